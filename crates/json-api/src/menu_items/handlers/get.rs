//! Get Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::domain::menu::records::MenuItemRecord;

use crate::{extensions::*, menu_items::errors::into_status_error, state::State};

/// Menu Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    pub id: Uuid,
    pub name: String,

    /// Price in minor units
    pub price: u64,

    pub category: String,

    /// Points earned per unit ordered
    pub reward_points: u64,

    pub created_at: String,
    pub updated_at: String,
}

impl From<MenuItemRecord> for MenuItemResponse {
    fn from(item: MenuItemRecord) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            name: item.name,
            price: item.price,
            category: item.category,
            reward_points: item.reward_points,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Menu Item Handler
#[endpoint(
    tags("menu"),
    summary = "Get Menu Item",
    responses(
        (status_code = StatusCode::OK, description = "Menu item found"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .menu
        .get_menu_item(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cafe_app::domain::menu::{MenuServiceError, records::MenuItemUuid};

    use crate::test_helpers::{Mocks, make_menu_item};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.anonymous_service(Router::with_path("menu-items/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_menu_item_returns_200() -> TestResult {
        let uuid = MenuItemUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .menu
            .expect_get_menu_item()
            .once()
            .withf(move |item| *item == uuid)
            .return_once(move |_| Ok(make_menu_item(uuid)));

        let mut res = TestClient::get(format!("http://example.com/menu-items/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: MenuItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.price, 350);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_menu_item_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .menu
            .expect_get_menu_item()
            .once()
            .return_once(|_| Err(MenuServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/menu-items/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.menu.expect_get_menu_item().never();

        let res = TestClient::get("http://example.com/menu-items/latte")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
