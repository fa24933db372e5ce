//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::domain::orders::{
    data::{NewOrder, NewOrderLine},
    records::OrderUuid,
};

use crate::{
    errors::ApiError, extensions::*, orders::errors::into_api_error, orders::get::OrderResponse,
    state::State,
};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub items: Vec<OrderLineRequest>,

    /// Points to spend; each is worth 50 minor units
    #[serde(default)]
    pub reward_points_redeemed: u64,
}

/// Order Line Request
///
/// Any `price` or `reward_points` sent with a line is ignored; the catalog is authoritative.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    /// Menu item ID
    pub id: Uuid,

    pub quantity: u32,
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            lines: request
                .items
                .into_iter()
                .map(|line| NewOrderLine {
                    menu_item: line.id.into(),
                    quantity: line.quantity,
                })
                .collect(),
            reward_points_redeemed: request.reward_points_redeemed,
        }
    }
}

/// Place Order Handler
///
/// Prices the cart from the menu and charges it to the caller's profile.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Insufficient balance or points, or invalid cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.place",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        lines = tracing::field::Empty,
        reward_points_redeemed = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;
    let order = NewOrder::from(json.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(session.user));
    span.record("order_uuid", tracing::field::display(order.uuid));
    span.record("lines", order.lines.len());
    span.record("reward_points_redeemed", order.reward_points_redeemed);

    let order = state
        .app
        .orders
        .place_order(session.user, order)
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        total_price = order.total_price,
        net_charge = order.net_charge,
        "placed order"
    );

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
