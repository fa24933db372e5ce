//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, SessionPolicy},
    database::{self, Db},
    domain::{
        menu::{MenuService, PgMenuService},
        orders::{OrdersService, PgOrdersService},
        profiles::{PgProfilesService, ProfilesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub menu: Arc<dyn MenuService>,
    pub orders: Arc<dyn OrdersService>,
    pub profiles: Arc<dyn ProfilesService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        sessions: SessionPolicy,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), sessions))
    }

    #[must_use]
    pub fn from_db(db: Db, sessions: SessionPolicy) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), sessions)),
            menu: Arc::new(PgMenuService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            profiles: Arc::new(PgProfilesService::new(db)),
        }
    }
}
