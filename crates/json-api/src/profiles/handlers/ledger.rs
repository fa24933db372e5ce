//! Profile Ledger Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::domain::profiles::records::LedgerEntryRecord;

use crate::{extensions::*, profiles::errors::into_status_error, state::State};

/// Ledger Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LedgerEntryResponse {
    pub id: Uuid,

    /// `order` or `funds`
    pub kind: String,

    pub balance_delta: i64,
    pub points_delta: i64,
    pub balance_after: i64,
    pub points_after: u64,

    /// The order that caused this entry, if any
    pub order: Option<Uuid>,

    pub created_at: String,
}

impl From<LedgerEntryRecord> for LedgerEntryResponse {
    fn from(entry: LedgerEntryRecord) -> Self {
        Self {
            id: entry.uuid.into_uuid(),
            kind: entry.kind.as_str().to_string(),
            balance_delta: entry.balance_delta,
            points_delta: entry.points_delta,
            balance_after: entry.balance_after,
            points_after: entry.points_after,
            order: entry.order_uuid.map(Into::into),
            created_at: entry.created_at.to_string(),
        }
    }
}

/// Profile Ledger Handler
///
/// Returns every balance and points change on a profile, newest first.
#[endpoint(
    tags("profiles"),
    summary = "Profile Ledger",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ledger entries"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<LedgerEntryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let entries = state
        .app
        .profiles
        .list_ledger_entries(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
