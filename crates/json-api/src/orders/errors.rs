//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use attar_app::domain::orders::{OrdersServiceError, records::OrderPlacement};

use crate::{
    errors::{ApiError, ErrorPayload, ShortfallItem},
    observability::CheckoutOutcome,
};

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found").into(),
        OrdersServiceError::Forbidden => StatusError::forbidden()
            .brief("Only sellers and admins may change orders")
            .into(),
        OrdersServiceError::EmptyCart => {
            ApiError::bad_request(ErrorPayload::new("EMPTY_CART", "Your cart is empty"))
        }
        OrdersServiceError::InsufficientStock(shortfalls) => ApiError::bad_request(
            ErrorPayload::new(
                "INSUFFICIENT_STOCK",
                "Some items do not have enough stock",
            )
            .with_items(
                shortfalls
                    .into_iter()
                    .map(|shortfall| ShortfallItem {
                        product_uuid: shortfall.product_uuid.into(),
                        variant_uuid: shortfall.variant_uuid.map(Into::into),
                        name: shortfall.name,
                        requested: shortfall.requested,
                        available: shortfall.available,
                    })
                    .collect(),
            ),
        ),
        OrdersServiceError::InvalidAddress(fields) => ApiError::bad_request(
            ErrorPayload::new("INVALID_ADDRESS", "Address is incomplete").with_fields(
                fields
                    .into_iter()
                    .map(|field| field.as_str().to_string())
                    .collect(),
            ),
        ),
        OrdersServiceError::InvalidCoupon(rejection) => {
            ApiError::bad_request(ErrorPayload::new("INVALID_COUPON", rejection.to_string()))
        }
        OrdersServiceError::InvalidPaymentMethod => ApiError::bad_request(ErrorPayload::new(
            "INVALID_PAYMENT_METHOD",
            "Unknown or inactive payment method",
        )),
        OrdersServiceError::InvalidTransition { from, to } => ApiError::conflict(
            ErrorPayload::new("INVALID_TRANSITION", format!("Cannot move order from {from} to {to}")),
        ),
        OrdersServiceError::Conflict => ApiError::conflict(ErrorPayload::new(
            "CONFLICT",
            "The order was changed by someone else; reload and retry",
        )),
        OrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Order already exists").into()
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload").into()
        }
        OrdersServiceError::Unavailable => {
            error!("order request timed out waiting for a database connection");

            StatusError::service_unavailable().into()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error().into()
        }
    }
}

/// Classify a checkout result for the checkout counter.
pub(crate) fn checkout_outcome(
    result: &Result<OrderPlacement, OrdersServiceError>,
) -> CheckoutOutcome {
    match result {
        Ok(placement) if placement.replayed => CheckoutOutcome::Replayed,
        Ok(_) => CheckoutOutcome::Created,
        Err(OrdersServiceError::EmptyCart) => CheckoutOutcome::EmptyCart,
        Err(OrdersServiceError::InsufficientStock(_)) => CheckoutOutcome::InsufficientStock,
        Err(
            OrdersServiceError::InvalidAddress(_)
            | OrdersServiceError::InvalidCoupon(_)
            | OrdersServiceError::InvalidPaymentMethod
            | OrdersServiceError::InvalidReference
            | OrdersServiceError::MissingRequiredData
            | OrdersServiceError::InvalidData,
        ) => CheckoutOutcome::Rejected,
        Err(_) => CheckoutOutcome::Failed,
    }
}

#[cfg(test)]
mod tests {
    use attar_app::domain::orders::{coupons::CouponRejection, status::OrderStatus};

    use super::*;

    fn payload(error: OrdersServiceError) -> Option<ErrorPayload> {
        match into_api_error(error) {
            ApiError::Rejected { payload, .. } => Some(payload),
            ApiError::Status(_) => None,
        }
    }

    #[test]
    fn business_rejections_carry_error_codes() {
        let codes: Vec<_> = [
            OrdersServiceError::EmptyCart,
            OrdersServiceError::InsufficientStock(Vec::new()),
            OrdersServiceError::InvalidAddress(Vec::new()),
            OrdersServiceError::InvalidCoupon(CouponRejection::Expired),
            OrdersServiceError::InvalidPaymentMethod,
            OrdersServiceError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
            },
            OrdersServiceError::Conflict,
        ]
        .into_iter()
        .filter_map(payload)
        .map(|payload| payload.error_code)
        .collect();

        assert_eq!(
            codes,
            [
                "EMPTY_CART",
                "INSUFFICIENT_STOCK",
                "INVALID_ADDRESS",
                "INVALID_COUPON",
                "INVALID_PAYMENT_METHOD",
                "INVALID_TRANSITION",
                "CONFLICT",
            ]
        );
    }

    #[test]
    fn infrastructure_errors_stay_plain() {
        assert!(payload(OrdersServiceError::Unavailable).is_none());
        assert!(payload(OrdersServiceError::NotFound).is_none());
    }

    #[test]
    fn checkout_outcomes_are_classified() {
        assert_eq!(
            checkout_outcome(&Err(OrdersServiceError::EmptyCart)),
            CheckoutOutcome::EmptyCart
        );
        assert_eq!(
            checkout_outcome(&Err(OrdersServiceError::InvalidPaymentMethod)),
            CheckoutOutcome::Rejected
        );
        assert_eq!(
            checkout_outcome(&Err(OrdersServiceError::Unavailable)),
            CheckoutOutcome::Failed
        );
    }
}
