//! Key/value cache used for login sessions.
//!
//! The [`CacheClient`] trait mirrors the small subset of Redis the session
//! layer needs: `SET` (which clears any expiry), `GET`, `EXPIRE`, `TTL` and `DEL`.

mod memory;
mod sql;

pub use memory::MemoryCache;
pub use sql::SqlCache;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::{CacheBackend, CacheConfig};
use crate::db::Store;

#[async_trait::async_trait]
pub trait CacheClient: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value and expiry.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Expires `key` after `seconds`. Returns `false` if the key does not exist.
    /// A zero TTL removes the key immediately.
    async fn expire(&self, key: &str, seconds: u64) -> Result<bool>;

    /// Whole seconds left before `key` expires. `None` if the key is missing
    /// or has no expiry.
    async fn ttl(&self, key: &str) -> Result<Option<u64>>;

    /// Removes `key`, returning how many live keys were removed.
    async fn del(&self, key: &str) -> Result<u64>;

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Builds the cache client selected in config.
pub async fn connect(config: &CacheConfig, store: &Store) -> Result<Arc<dyn CacheClient>> {
    let client: Arc<dyn CacheClient> = match config.backend {
        CacheBackend::Sql => {
            store.ping().await?;
            Arc::new(SqlCache::new(store.clone()))
        }
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
    };

    info!(backend = ?config.backend, "Cache connected");
    Ok(client)
}
