//! Profile Errors

use salvo::http::StatusError;
use tracing::error;

use cafe_app::domain::profiles::ProfilesServiceError;

pub(crate) fn into_status_error(error: ProfilesServiceError) -> StatusError {
    match error {
        ProfilesServiceError::NotFound => StatusError::not_found().brief("Profile not found"),
        ProfilesServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Amount would overflow the balance")
        }
        ProfilesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile data")
        }
        ProfilesServiceError::Sql(source) => {
            error!("profile storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
