use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::CacheClient;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Process-local cache. Expired entries are dropped lazily on access.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl CacheClient for MemoryCache {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let live = entries.get(key).is_some_and(|e| e.is_live(now));
        if !live {
            entries.remove(key);
            return Ok(false);
        }

        if seconds == 0 {
            entries.remove(key);
            return Ok(true);
        }

        if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = now.checked_add(Duration::from_secs(seconds));
        }
        Ok(true)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|e| e.is_live(now))
            .and_then(|e| e.expires_at)
            .map(|at| at.saturating_duration_since(now).as_secs()))
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(u64::from(removed.is_some_and(|e| e.is_live(now))))
    }

    async fn close(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
