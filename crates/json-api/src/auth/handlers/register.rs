//! Register Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cafe_app::auth::NewRegistration;

use crate::{
    auth::{UserResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: String,

    /// Optional contact address
    #[serde(default)]
    pub email: String,

    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for NewRegistration {
    fn from(request: RegisterRequest) -> Self {
        NewRegistration {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Register Handler
///
/// Creates a user with an empty profile.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.register",
    skip(json, depot, res),
    fields(username = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("username", tracing::field::display(&request.username));

    let user = state
        .app
        .auth
        .register(request.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(user = %user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
