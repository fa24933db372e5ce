//! Auth Errors

use salvo::http::{StatusCode, StatusError};
use tracing::error;

use cafe_app::auth::{AuthServiceError, FieldErrors};

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::Validation(errors) => ApiError::Invalid(errors),
        AuthServiceError::UsernameTaken => {
            let mut errors = FieldErrors::new();

            errors.insert(
                "username".to_string(),
                vec!["A user with that username already exists.".to_string()],
            );

            ApiError::Invalid(errors)
        }
        AuthServiceError::InvalidCredentials => {
            ApiError::rejected(StatusCode::BAD_REQUEST, "Wrong Credentials")
        }
        AuthServiceError::Unauthenticated => StatusError::unauthorized().into(),
        AuthServiceError::PasswordHash(message) => {
            error!("failed to hash password: {message}");

            StatusError::internal_server_error().into()
        }
        AuthServiceError::Expiry(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error().into()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
