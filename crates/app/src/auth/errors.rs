//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("profile not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("invalid bearer token")]
    Token(#[source] jsonwebtoken::errors::Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<jsonwebtoken::errors::Error> for AuthServiceError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::Token(error)
    }
}
