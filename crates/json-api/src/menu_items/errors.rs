//! Menu Item Errors

use salvo::http::StatusError;
use tracing::error;

use cafe_app::domain::menu::MenuServiceError;

pub(crate) fn into_status_error(error: MenuServiceError) -> StatusError {
    match error {
        MenuServiceError::AlreadyExists => {
            StatusError::conflict().brief("Menu item already exists")
        }
        MenuServiceError::InvalidReference
        | MenuServiceError::MissingRequiredData
        | MenuServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid menu item payload")
        }
        MenuServiceError::NotFound => StatusError::not_found().brief("Menu item not found"),
        MenuServiceError::Sql(source) => {
            error!("menu storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
