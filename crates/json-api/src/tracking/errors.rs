//! Tracking Errors

use salvo::http::StatusError;
use tracing::error;

use attar_app::domain::tracking::TrackingServiceError;

pub(crate) fn into_status_error(error: TrackingServiceError) -> StatusError {
    match error {
        TrackingServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        TrackingServiceError::Forbidden => {
            StatusError::forbidden().brief("Only sellers and admins may add tracking entries")
        }
        TrackingServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("A tracking message is required")
        }
        TrackingServiceError::InvalidMetadata => {
            StatusError::bad_request().brief("Metadata must be a JSON object")
        }
        TrackingServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid tracking payload")
        }
        TrackingServiceError::Unavailable => {
            error!("tracking request timed out waiting for a database connection");

            StatusError::service_unavailable()
        }
        TrackingServiceError::Sql(source) => {
            error!("tracking storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
