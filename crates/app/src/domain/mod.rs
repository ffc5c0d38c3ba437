//! Storefront Domain Concerns

pub mod addresses;
pub(crate) mod amounts;
pub mod carts;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod tracking;
