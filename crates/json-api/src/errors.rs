//! JSON error responses.

use cafe_app::auth::FieldErrors;
use salvo::{
    Scribe,
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// What went wrong
    pub error: String,
}

/// Handler error rendered in the shape clients of each endpoint expect.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Renders `{"error": message}`.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
    },

    /// Renders the field errors map with `400 Bad Request`.
    #[error("invalid fields")]
    Invalid(FieldErrors),

    /// Renders salvo's standard error body.
    #[error(transparent)]
    Status(#[from] StatusError),
}

impl ApiError {
    pub(crate) fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::rejected(StatusCode::BAD_REQUEST, message)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match self {
            Self::Rejected { status, message } => {
                res.status_code(status);
                res.render(Json(ErrorResponse { error: message }));
            }
            Self::Invalid(errors) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(errors));
            }
            Self::Status(error) => res.render(error),
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn rejected() -> Result<&'static str, ApiError> {
        Err(ApiError::bad_request("Insufficient balance"))
    }

    #[handler]
    async fn invalid() -> Result<&'static str, ApiError> {
        let mut errors = FieldErrors::new();

        errors
            .entry("username".to_string())
            .or_default()
            .push("This field may not be blank.".to_string());

        Err(ApiError::Invalid(errors))
    }

    #[handler]
    async fn status() -> Result<&'static str, ApiError> {
        Err(StatusError::not_found().into())
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("rejected").get(rejected))
                .push(Router::with_path("invalid").get(invalid))
                .push(Router::with_path("status").get(status)),
        )
    }

    #[tokio::test]
    async fn rejected_renders_error_message() -> TestResult {
        let mut res = TestClient::get("http://example.com/rejected")
            .send(&service())
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body, json!({ "error": "Insufficient balance" }));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_renders_field_errors() -> TestResult {
        let mut res = TestClient::get("http://example.com/invalid")
            .send(&service())
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            json!({ "username": ["This field may not be blank."] })
        );

        Ok(())
    }

    #[tokio::test]
    async fn status_keeps_its_code() -> TestResult {
        let res = TestClient::get("http://example.com/status")
            .send(&service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
