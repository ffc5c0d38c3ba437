//! Address Errors

use salvo::http::StatusError;
use tracing::error;

use attar_app::domain::addresses::AddressesServiceError;

pub(crate) fn into_status_error(error: AddressesServiceError) -> StatusError {
    match error {
        AddressesServiceError::NotFound => StatusError::not_found().brief("Address not found"),
        AddressesServiceError::DuplicateDefault => {
            StatusError::conflict().brief("Another default address of this kind exists")
        }
        AddressesServiceError::MissingRequiredData | AddressesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid address payload")
        }
        AddressesServiceError::Unavailable => {
            error!("address request timed out waiting for a database connection");

            StatusError::service_unavailable()
        }
        AddressesServiceError::Sql(source) => {
            error!("address storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
