//! Delete Menu Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, menu_items::errors::into_status_error, state::State};

/// Delete Menu Item Handler
///
/// Past orders keep their lines for the deleted item.
#[endpoint(
    tags("menu"),
    summary = "Delete Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "menu_items.delete",
    skip(id, depot),
    fields(menu_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    tracing::Span::current().record("menu_item_uuid", tracing::field::display(id));

    state
        .app
        .menu
        .delete_menu_item(id.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!("deleted menu item");

    Ok(StatusCode::OK)
}
