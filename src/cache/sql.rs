use anyhow::Result;

use super::CacheClient;
use crate::db::Store;

/// Cache backed by the `cache_entries` table of the main database.
#[derive(Clone)]
pub struct SqlCache {
    store: Store,
}

impl SqlCache {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl CacheClient for SqlCache {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.store.cache_repo().set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.store.cache_repo().get(key).await
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool> {
        self.store.cache_repo().expire(key, seconds).await
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>> {
        self.store.cache_repo().ttl(key).await
    }

    async fn del(&self, key: &str) -> Result<u64> {
        self.store.cache_repo().del(key).await
    }
}
