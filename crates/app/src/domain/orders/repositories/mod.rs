//! Order Repositories

mod checkout;
mod items;
mod orders;

pub(crate) use checkout::{CheckoutLine, PgCheckoutRepository};
pub(crate) use items::{NewOrderItem, PgOrderItemsRepository};
pub(crate) use orders::{NewOrderRow, PgOrdersRepository};
