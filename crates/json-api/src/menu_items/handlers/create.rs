//! Create Menu Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::domain::menu::{data::NewMenuItem, records::MenuItemUuid};

use crate::{
    extensions::*, menu_items::errors::into_status_error, menu_items::get::MenuItemResponse,
    state::State,
};

/// Create Menu Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateMenuItemRequest {
    /// Generated when omitted
    #[serde(default)]
    pub id: Option<Uuid>,

    pub name: String,

    /// Price in minor units
    pub price: u64,

    pub category: String,

    #[serde(default)]
    pub reward_points: u64,
}

impl From<CreateMenuItemRequest> for NewMenuItem {
    fn from(request: CreateMenuItemRequest) -> Self {
        NewMenuItem {
            uuid: request
                .id
                .map_or_else(MenuItemUuid::new, MenuItemUuid::from_uuid),
            name: request.name,
            price: request.price,
            category: request.category,
            reward_points: request.reward_points,
        }
    }
}

/// Create Menu Item Handler
#[endpoint(
    tags("menu"),
    summary = "Create Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Menu item created"),
        (status_code = StatusCode::CONFLICT, description = "Menu item already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "menu_items.create",
    skip(json, depot, res),
    fields(menu_item_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateMenuItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let item = NewMenuItem::from(json.into_inner());

    let span = tracing::Span::current();

    span.record("menu_item_uuid", tracing::field::display(item.uuid));
    span.record("price", item.price);

    let item = state
        .app
        .menu
        .create_menu_item(item)
        .await
        .map_err(into_status_error)?;

    tracing::info!(name = %item.name, "created menu item");

    res.add_header(LOCATION, format!("/menu-items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
