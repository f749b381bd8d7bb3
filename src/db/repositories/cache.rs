use anyhow::{Context, Result};
use chrono::SecondsFormat;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::entities::{cache_entries, prelude::*};

/// Key/value rows with an optional expiry, read with Redis-like semantics.
pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let active_model = cache_entries::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            expires_at: Set(None),
            updated_at: Set(timestamp(chrono::Utc::now())),
        };

        // SET replaces the value and clears any pending expiry
        CacheEntries::insert(active_model)
            .on_conflict(
                OnConflict::column(cache_entries::Column::Key)
                    .update_columns([
                        cache_entries::Column::Value,
                        cache_entries::Column::ExpiresAt,
                        cache_entries::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("Failed to write cache entry")?;

        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = timestamp(chrono::Utc::now());

        // Opportunistic cleanup
        if let Err(e) = CacheEntries::delete_many()
            .filter(cache_entries::Column::ExpiresAt.lte(&now))
            .exec(&self.conn)
            .await
        {
            debug!(error = %e, "Failed to purge expired cache entries");
        }

        let entry = CacheEntries::find()
            .filter(cache_entries::Column::Key.eq(key))
            .filter(live(&now))
            .one(&self.conn)
            .await
            .context("Failed to read cache entry")?;

        Ok(entry.map(|e| e.value))
    }

    /// Returns `false` when the key does not exist. A zero TTL deletes the key.
    pub async fn expire(&self, key: &str, seconds: u64) -> Result<bool> {
        if seconds == 0 {
            return Ok(self.del(key).await? > 0);
        }

        let now = chrono::Utc::now();
        let seconds = i64::try_from(seconds).context("TTL out of range")?;
        let expires_at = chrono::Duration::try_seconds(seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .context("TTL out of range")?;
        let now = timestamp(now);

        let result = CacheEntries::update_many()
            .col_expr(
                cache_entries::Column::ExpiresAt,
                Expr::value(timestamp(expires_at)),
            )
            .col_expr(cache_entries::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(cache_entries::Column::Key.eq(key))
            .filter(live(&now))
            .exec(&self.conn)
            .await
            .context("Failed to set cache entry expiry")?;

        Ok(result.rows_affected > 0)
    }

    /// Whole seconds until a live key expires, `None` without a key or expiry.
    pub async fn ttl(&self, key: &str) -> Result<Option<u64>> {
        let now = chrono::Utc::now();

        let entry = CacheEntries::find()
            .filter(cache_entries::Column::Key.eq(key))
            .filter(live(&timestamp(now)))
            .one(&self.conn)
            .await
            .context("Failed to read cache entry expiry")?;

        let Some(expires_at) = entry.and_then(|e| e.expires_at) else {
            return Ok(None);
        };

        let expires_at = chrono::DateTime::parse_from_rfc3339(&expires_at)
            .context("Malformed cache entry expiry")?;
        let remaining = expires_at.with_timezone(&chrono::Utc) - now;

        Ok(Some(u64::try_from(remaining.num_seconds()).unwrap_or(0)))
    }

    /// Returns the number of live keys removed.
    pub async fn del(&self, key: &str) -> Result<u64> {
        let now = timestamp(chrono::Utc::now());

        let result = CacheEntries::delete_many()
            .filter(cache_entries::Column::Key.eq(key))
            .filter(live(&now))
            .exec(&self.conn)
            .await
            .context("Failed to delete cache entry")?;

        // An expired row still on disk counts as absent
        if let Err(e) = CacheEntries::delete_by_id(key.to_string())
            .exec(&self.conn)
            .await
        {
            debug!(error = %e, "Failed to purge expired cache entry");
        }

        Ok(result.rows_affected)
    }
}

fn live(now: &str) -> Condition {
    Condition::any()
        .add(cache_entries::Column::ExpiresAt.is_null())
        .add(cache_entries::Column::ExpiresAt.gt(now))
}

/// Fixed-width so that string comparison in SQL orders correctly.
fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
