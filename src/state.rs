use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::cache::{self, CacheClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CacheSessionService, SeaOrmUserService, SessionService, TokenIssuer, UserService,
    UuidTokenIssuer,
};

/// Connected collaborators and the services built on them.
///
/// Created once on startup; [`SharedState::close`] releases the cache and the
/// database pool on shutdown.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub cache: Arc<dyn CacheClient>,

    pub users: Arc<dyn UserService>,

    pub sessions: Arc<dyn SessionService>,
}

impl SharedState {
    pub async fn new(config: Config) -> Result<Self> {
        Self::with_token_issuer(config, Arc::new(UuidTokenIssuer)).await
    }

    pub async fn with_token_issuer(config: Config, tokens: Arc<dyn TokenIssuer>) -> Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let cache = cache::connect(&config.cache, &store).await?;

        let users =
            Arc::new(SeaOrmUserService::new(store.clone())) as Arc<dyn UserService + 'static>;

        let sessions = Arc::new(CacheSessionService::new(
            store.clone(),
            cache.clone(),
            tokens,
            config.cache.session_ttl_seconds,
        )) as Arc<dyn SessionService + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            cache,
            users,
            sessions,
        })
    }

    pub async fn close(&self) -> Result<()> {
        self.cache.close().await?;
        self.store.close().await?;
        info!("Shutdown complete");
        Ok(())
    }
}
