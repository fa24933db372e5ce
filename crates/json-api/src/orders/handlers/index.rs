//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError, extensions::*, orders::errors::into_api_error, orders::get::OrderResponse,
    state::State,
};

/// Order Index Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(session.user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
