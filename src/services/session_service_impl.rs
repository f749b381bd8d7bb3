//! Cache-backed implementation of the `SessionService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::CacheClient;
use crate::cookies::SignedCookies;
use crate::db::Store;
use crate::models::user::SessionIdentity;
use crate::services::session_service::{SessionError, SessionService};
use crate::services::token::TokenIssuer;

pub struct CacheSessionService {
    store: Store,
    cache: Arc<dyn CacheClient>,
    tokens: Arc<dyn TokenIssuer>,
    ttl_seconds: u64,
}

impl CacheSessionService {
    #[must_use]
    pub fn new(
        store: Store,
        cache: Arc<dyn CacheClient>,
        tokens: Arc<dyn TokenIssuer>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            cache,
            tokens,
            ttl_seconds,
        }
    }
}

fn cache_error(err: &anyhow::Error) -> SessionError {
    SessionError::Cache(err.to_string())
}

/// First few characters, enough to correlate log lines.
fn token_prefix(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}

#[async_trait]
impl SessionService for CacheSessionService {
    async fn set_cookie(&self, username: &str) -> Result<String, SessionError> {
        let token = self.tokens.issue();

        let user = self
            .store
            .get_user_by_username(username)
            .await
            .map_err(|e| SessionError::Database(e.to_string()))?
            .ok_or_else(|| SessionError::UserNotFound(username.to_string()))?;

        let identity = SessionIdentity::from(&user);
        let payload = serde_json::to_string(&identity)?;

        self.cache
            .set(&token, &payload)
            .await
            .map_err(|e| cache_error(&e))?;
        self.cache
            .expire(&token, self.ttl_seconds)
            .await
            .map_err(|e| cache_error(&e))?;

        info!(
            user_id = identity.id,
            token = token_prefix(&token),
            ttl_seconds = self.ttl_seconds,
            "Session opened"
        );

        Ok(token)
    }

    async fn del_cookie(&self, token: &str) -> Result<bool, SessionError> {
        let removed = self.cache.del(token).await.map_err(|e| cache_error(&e))?;

        debug!(token = token_prefix(token), removed, "Session deleted");
        Ok(removed == 1)
    }

    async fn get_cookie_id(&self, cookies: &SignedCookies) -> Result<Option<i32>, SessionError> {
        let Some(token) = cookies.login_token() else {
            return Ok(None);
        };

        let identity = self.get_session(token).await?;
        Ok(identity.map(|i| i.id))
    }

    async fn get_session(&self, token: &str) -> Result<Option<SessionIdentity>, SessionError> {
        let Some(raw) = self.cache.get(token).await.map_err(|e| cache_error(&e))? else {
            return Ok(None);
        };

        match serde_json::from_str::<SessionIdentity>(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                debug!(token = token_prefix(token), error = %e, "Unreadable session entry");
                Ok(None)
            }
        }
    }
}
