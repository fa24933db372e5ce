//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{
    auth::UserResponse, errors::ApiError, extensions::*, orders::errors::into_api_error,
    state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub user: UserResponse,
    pub items: Vec<OrderItemResponse>,

    /// Sum of unit price times quantity, in minor units
    pub total_price: u64,

    pub reward_points_earned: u64,
    pub reward_points_redeemed: u64,

    /// Amount taken from the balance after redemption
    pub net_charge: u64,

    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into_uuid(),
            user: order.user.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_price: order.total_price,
            reward_points_earned: order.reward_points_earned,
            reward_points_redeemed: order.reward_points_redeemed,
            net_charge: order.net_charge,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub id: Uuid,
    pub menu_item: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: u32,

    /// Catalog price when the order was placed
    pub unit_price: u64,

    pub unit_reward_points: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            menu_item: item.menu_item_uuid.into_uuid(),
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit_price: item.unit_price,
            unit_reward_points: item.unit_reward_points,
        }
    }
}

/// Get Order Handler
///
/// Only the caller's own orders are visible.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let order = state
        .app
        .orders
        .get_order(session.user, id.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cafe_app::domain::{
        menu::records::MenuItemUuid,
        orders::{OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_order};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("orders/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_own_order_returns_200() -> TestResult {
        let uuid = OrderUuid::new();
        let menu_item = MenuItemUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |user, order| *user == TEST_USER_UUID && *order == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, menu_item)));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.user.username, "alice");
        assert_eq!(body.net_charge, 500);
        assert_eq!(
            body.items.first().map(|item| item.menu_item),
            Some(menu_item.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_someone_elses_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
