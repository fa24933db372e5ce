//! Menu Item Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, menu_items::get::MenuItemResponse, state::State};

/// Menu Item Index Handler
///
/// Returns the live menu, grouped by category.
#[endpoint(tags("menu"), summary = "List Menu Items")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<MenuItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .menu
        .list_menu_items()
        .await
        .or_500("failed to fetch menu items")?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
