//! Depot helper extensions.

use std::any::Any;

use cafe_app::auth::AuthenticatedSession;
use salvo::prelude::{Depot, StatusError};

const SESSION_DEPOT_KEY: &str = "session";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the session that authenticated this request.
    fn insert_session(&mut self, session: AuthenticatedSession);

    /// The session that authenticated this request.
    fn session_or_401(&self) -> Result<AuthenticatedSession, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session(&mut self, session: AuthenticatedSession) {
        self.insert(SESSION_DEPOT_KEY, session);
    }

    fn session_or_401(&self) -> Result<AuthenticatedSession, StatusError> {
        self.get::<AuthenticatedSession>(SESSION_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
