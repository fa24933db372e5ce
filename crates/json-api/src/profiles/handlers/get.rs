//! Get Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafe_app::domain::profiles::records::ProfileRecord;

use crate::{auth::UserResponse, extensions::*, profiles::errors::into_status_error, state::State};

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub id: Uuid,
    pub user: UserResponse,

    /// Spendable balance in minor units. May be negative.
    pub balance: i64,

    pub reward_points: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(profile: ProfileRecord) -> Self {
        Self {
            id: profile.uuid.into_uuid(),
            user: profile.user.into(),
            balance: profile.balance,
            reward_points: profile.reward_points,
            created_at: profile.created_at.to_string(),
            updated_at: profile.updated_at.to_string(),
        }
    }
}

/// Get Profile Handler
#[endpoint(
    tags("profiles"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile found"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profile = state
        .app
        .profiles
        .get_profile(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cafe_app::domain::profiles::{ProfilesServiceError, records::ProfileUuid};

    use crate::test_helpers::{Mocks, make_profile};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("user-profiles/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_profile_returns_200() -> TestResult {
        let uuid = ProfileUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .profiles
            .expect_get_profile()
            .once()
            .withf(move |profile| *profile == uuid)
            .return_once(move |_| Ok(make_profile(uuid, -250)));

        let mut res = TestClient::get(format!("http://example.com/user-profiles/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.balance, -250);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_profile_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .profiles
            .expect_get_profile()
            .once()
            .return_once(|_| Err(ProfilesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/user-profiles/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
