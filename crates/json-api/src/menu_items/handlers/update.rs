//! Update Menu Item Handler

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

use cafe_app::domain::menu::data::MenuItemUpdate;

use crate::{
    extensions::*, menu_items::errors::into_status_error, menu_items::get::MenuItemResponse,
    state::State,
};

/// Update Menu Item Request
///
/// Replaces every editable field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateMenuItemRequest {
    pub name: String,
    pub price: u64,
    pub category: String,

    #[serde(default)]
    pub reward_points: u64,
}

impl From<UpdateMenuItemRequest> for MenuItemUpdate {
    fn from(request: UpdateMenuItemRequest) -> Self {
        MenuItemUpdate {
            name: request.name,
            price: request.price,
            category: request.category,
            reward_points: request.reward_points,
        }
    }
}

/// Update Menu Item Handler
#[endpoint(
    tags("menu"),
    summary = "Update Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "menu_items.update",
    skip(id, json, depot),
    fields(menu_item_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateMenuItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("menu_item_uuid", tracing::field::display(id));
    span.record("price", request.price);

    let item = state
        .app
        .menu
        .update_menu_item(id.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!("updated menu item");

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use cafe_app::domain::menu::{MenuServiceError, records::MenuItemUuid};

    use crate::test_helpers::{Mocks, make_menu_item};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("menu-items/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_returns_updated_item() -> TestResult {
        let uuid = MenuItemUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .menu
            .expect_update_menu_item()
            .once()
            .withf(move |item, update| {
                *item == uuid
                    && *update
                        == MenuItemUpdate {
                            name: "Oat Flat White".to_string(),
                            price: 380,
                            category: "Coffee".to_string(),
                            reward_points: 3,
                        }
            })
            .return_once(move |_, update| {
                let mut item = make_menu_item(uuid);

                item.name = update.name;
                item.price = update.price;
                item.reward_points = update.reward_points;

                Ok(item)
            });

        let mut res = TestClient::put(format!("http://example.com/menu-items/{uuid}"))
            .json(&json!({
                "name": "Oat Flat White",
                "price": 380,
                "category": "Coffee",
                "reward_points": 3,
            }))
            .send(&make_service(mocks))
            .await;

        let body: MenuItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Oat Flat White");
        assert_eq!(body.price, 380);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .menu
            .expect_update_menu_item()
            .once()
            .return_once(|_, _| Err(MenuServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/menu-items/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Mocha", "price": 400, "category": "Coffee" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
