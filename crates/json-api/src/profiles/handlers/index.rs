//! Profile Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, profiles::get::ProfileResponse, state::State};

/// Profile Index Handler
#[endpoint(tags("profiles"), summary = "List Profiles", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProfileResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profiles = state
        .app
        .profiles
        .list_profiles()
        .await
        .or_500("failed to fetch profiles")?;

    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}
