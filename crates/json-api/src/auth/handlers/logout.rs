//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::into_api_error, errors::ApiError, extensions::*, state::State};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub success: String,
}

/// Logout Handler
///
/// Revokes the session that authenticated this request.
#[endpoint(
    tags("auth"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.logout",
    skip(depot),
    fields(session_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LogoutResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    tracing::Span::current().record("session_uuid", tracing::field::display(session.session));

    state
        .app
        .auth
        .logout(session.session)
        .await
        .map_err(into_api_error)?;

    tracing::info!("logged out");

    Ok(Json(LogoutResponse {
        success: "Successfully logged out".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use cafe_app::auth::AuthServiceError;

    use crate::test_helpers::{Mocks, TEST_SESSION_UUID};

    use super::*;

    #[tokio::test]
    async fn test_logout_revokes_current_session() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_logout()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(|_| Ok(()));

        let mut res = TestClient::post("http://example.com/auth/logout")
            .send(&mocks.service(Router::with_path("auth/logout").post(handler)))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, json!({ "success": "Successfully logged out" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_of_revoked_session_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_logout()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthenticated));

        let res = TestClient::post("http://example.com/auth/logout")
            .send(&mocks.service(Router::with_path("auth/logout").post(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_without_session_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_logout().never();

        let res = TestClient::post("http://example.com/auth/logout")
            .send(&mocks.anonymous_service(Router::with_path("auth/logout").post(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
