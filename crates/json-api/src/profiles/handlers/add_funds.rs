//! Add Funds Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, profiles::errors::into_status_error, state::State};

/// Add Funds Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddFundsRequest {
    /// Minor units to add. Not sign-checked.
    pub amount: i64,
}

/// Add Funds Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddFundsResponse {
    pub message: String,
}

/// Add Funds Handler
///
/// Adds an amount to a profile's balance.
#[endpoint(
    tags("profiles"),
    summary = "Add Funds",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Funds added"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profiles.add_funds",
    skip(id, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        profile_uuid = tracing::field::Empty,
        amount = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<AddFundsRequest>,
    depot: &mut Depot,
) -> Result<Json<AddFundsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;
    let amount = json.into_inner().amount;
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(session.user));
    span.record("profile_uuid", tracing::field::display(id));
    span.record("amount", amount);

    let profile = state
        .app
        .profiles
        .add_funds(id.into(), amount)
        .await
        .map_err(into_status_error)?;

    tracing::info!(balance = profile.balance, "added funds");

    Ok(Json(AddFundsResponse {
        message: format!("Added {amount} to balance"),
    }))
}
