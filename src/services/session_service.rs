//! Domain service for login sessions.
//!
//! A session is a cache entry keyed by an opaque token whose value is the
//! JSON-encoded [`SessionIdentity`]. Entries expire on their own after the
//! configured TTL; logout deletes them early.

use thiserror::Error;

use crate::cookies::SignedCookies;
use crate::models::user::SessionIdentity;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sea_orm::DbErr> for SessionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    /// Opens a session for an existing user and returns its token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UserNotFound`] if no user has this username.
    async fn set_cookie(&self, username: &str) -> Result<String, SessionError>;

    /// Ends a session. Returns `true` only if a live session was removed.
    async fn del_cookie(&self, token: &str) -> Result<bool, SessionError>;

    /// Resolves the request's login cookie to a user id.
    ///
    /// Missing cookie, unknown or expired token, and unreadable cache entries
    /// all yield `None`.
    async fn get_cookie_id(&self, cookies: &SignedCookies) -> Result<Option<i32>, SessionError>;

    /// Full identity behind a token, with the same absence rules as
    /// [`get_cookie_id`](Self::get_cookie_id).
    async fn get_session(&self, token: &str) -> Result<Option<SessionIdentity>, SessionError>;
}
