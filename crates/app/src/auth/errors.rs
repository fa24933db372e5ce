//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{FieldErrors, SessionTokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("registration is invalid")]
    Validation(FieldErrors),

    #[error("username is already taken")]
    UsernameTaken,

    #[error("wrong credentials")]
    InvalidCredentials,

    #[error("session is missing, expired or revoked")]
    Unauthenticated,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("session expiry is out of range")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(_error: SessionTokenError) -> Self {
        Self::Unauthenticated
    }
}
