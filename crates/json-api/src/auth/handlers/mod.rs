//! Auth Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::auth::UserRecord;

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;

/// User Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    /// When the user registered
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.uuid.into_uuid(),
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_string(),
        }
    }
}
