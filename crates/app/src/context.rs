//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{StoreTokensService, TokenSettings, TokensService},
    database::{self, PgStoreHealth, StoreHealth},
    domain::configs::{ConfigsService, StoreConfigsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub tokens: Arc<dyn TokensService>,
    pub configs: Arc<dyn ConfigsService>,
    pub store: Arc<dyn StoreHealth>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, settings: TokenSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self {
            tokens: Arc::new(StoreTokensService::from_pool(pool.clone(), settings)),
            configs: Arc::new(StoreConfigsService::from_pool(pool.clone())),
            store: Arc::new(PgStoreHealth::new(pool)),
        })
    }
}
