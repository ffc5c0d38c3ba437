//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use attar_app::domain::carts::CartsServiceError;

use crate::errors::{ApiError, ErrorPayload};

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item or product not found").into(),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1").into()
        }
        CartsServiceError::OutOfStock { available } => ApiError::bad_request(
            ErrorPayload::new("OUT_OF_STOCK", format!("Only {available} left in stock"))
                .with_available(available),
        ),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product or variant").into()
        }
        CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload").into()
        }
        CartsServiceError::Unavailable => {
            error!("cart request timed out waiting for a database connection");

            StatusError::service_unavailable().into()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
