//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::{
    coupons::CouponRejection,
    records::StockShortfall,
    snapshots::AddressField,
    status::OrderStatus,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("only staff may change orders")]
    Forbidden,

    #[error("cart is empty")]
    EmptyCart,

    #[error("insufficient stock for {} item(s)", .0.len())]
    InsufficientStock(Vec<StockShortfall>),

    #[error("address is incomplete")]
    InvalidAddress(Vec<AddressField>),

    #[error("coupon cannot be applied: {0}")]
    InvalidCoupon(CouponRejection),

    #[error("unknown or inactive payment method")]
    InvalidPaymentMethod,

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order was changed concurrently")]
    Conflict,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("database unavailable")]
    Unavailable,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => return Self::NotFound,
            Error::PoolTimedOut => return Self::Unavailable,
            Error::Encode(_) => return Self::InvalidData,
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_errors_are_classified() {
        assert!(matches!(
            OrdersServiceError::from(Error::PoolTimedOut),
            OrdersServiceError::Unavailable
        ));
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
        assert!(matches!(
            OrdersServiceError::from(Error::PoolClosed),
            OrdersServiceError::Sql(_)
        ));
    }
}
