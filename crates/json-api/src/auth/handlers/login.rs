//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::auth::{Credentials, IssuedSession};

use crate::{auth::into_api_error, errors::ApiError, extensions::*, state::State};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            username: request.username,
            password: request.password,
        }
    }
}

/// Login Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: String,

    /// Bearer token for the `Authorization` header. Shown only once.
    pub token: String,

    /// When the token stops authenticating
    pub expires_at: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl From<IssuedSession> for LoginResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            id: issued.user.uuid.into_uuid(),
            username: issued.user.username,
            email: issued.user.email,
            created_at: issued.user.created_at.to_string(),
            token: issued.token,
            expires_at: issued.metadata.expires_at.to_string(),
        }
    }
}

/// Login Handler
///
/// Checks a username and password and opens a session.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Wrong credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.login",
    skip(json, depot),
    fields(username = tracing::field::Empty, session_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let span = tracing::Span::current();

    span.record("username", tracing::field::display(&request.username));

    let issued = state
        .app
        .auth
        .login(request.into())
        .await
        .map_err(into_api_error)?;

    span.record("session_uuid", tracing::field::display(issued.metadata.uuid));

    tracing::info!("logged in");

    Ok(Json(issued.into()))
}
