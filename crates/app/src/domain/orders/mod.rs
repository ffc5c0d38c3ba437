//! Orders

pub(crate) mod checkout;
pub mod coupons;
pub mod data;
pub mod errors;
pub mod number;
pub mod pricing;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod snapshots;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
