//! Order Errors

use salvo::http::{StatusCode, StatusError};
use tracing::error;

use cafe_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::InsufficientBalance => ApiError::bad_request("Insufficient balance"),
        OrdersServiceError::InsufficientPoints => {
            ApiError::bad_request("Insufficient reward points")
        }
        OrdersServiceError::InvalidOrder(reason) => ApiError::bad_request(reason.to_string()),
        OrdersServiceError::MenuItemNotFound(item) => {
            ApiError::rejected(StatusCode::NOT_FOUND, format!("Menu item {item} not found"))
        }
        OrdersServiceError::ProfileNotFound => {
            ApiError::rejected(StatusCode::NOT_FOUND, "Profile not found")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found").into(),
        OrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Order already exists").into()
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order data").into()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
