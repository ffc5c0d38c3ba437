//! Health service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthServiceError {
    #[error("database unavailable")]
    Unavailable,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for HealthServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::PoolTimedOut => Self::Unavailable,
            _ => Self::Sql(error),
        }
    }
}
