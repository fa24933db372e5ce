//! Current Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, profiles::errors::into_status_error, profiles::get::ProfileResponse,
    state::State,
};

/// Current Profile Handler
///
/// Returns the profile of the authenticated user.
#[endpoint(
    tags("profiles"),
    summary = "Get My Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let profile = state
        .app
        .profiles
        .get_profile_for_user(session.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cafe_app::domain::profiles::records::ProfileUuid;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_profile};

    use super::*;

    #[tokio::test]
    async fn test_me_returns_callers_profile() -> TestResult {
        let uuid = ProfileUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .profiles
            .expect_get_profile_for_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(make_profile(uuid, 1_000)));

        let mut res = TestClient::get("http://example.com/user-profiles/me")
            .send(&mocks.service(Router::with_path("user-profiles/me").get(handler)))
            .await;

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.user.id, TEST_USER_UUID.into_uuid());

        Ok(())
    }
}
