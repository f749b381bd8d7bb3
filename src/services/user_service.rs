//! Domain service for user accounts.
//!
//! Handles account creation, updates, lookups, uniqueness checks and
//! email/password authentication. Lookups that find nothing return `None`
//! rather than an error.

use thiserror::Error;

use crate::models::user::{CreateUser, NewUser, SignInUser, User, UserChanges, UserUpdate};
use crate::services::user_mapper;

/// Errors from the persistence layer underneath user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if err.downcast_ref::<sea_orm::DbErr>().is_some() {
            Self::Database(message)
        } else {
            Self::Internal(message)
        }
    }
}

/// Domain service trait for user accounts.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Builds a creation payload with a fresh salt and hash.
    fn create_user_salt_hash(&self, payload: NewUser) -> CreateUser {
        user_mapper::to_create_user(payload)
    }

    /// Persists a new user. Returns `None` if the username or email is taken.
    async fn create(&self, payload: CreateUser) -> Result<Option<User>, UserError>;

    /// Swaps a plaintext password for new credentials; no password means no change.
    fn update_user_salt_hash(&self, payload: UserUpdate) -> UserChanges {
        user_mapper::to_user_changes(payload)
    }

    /// Applies a partial update. Returns `None` for an unknown id, or when the
    /// new username or email is already held by another account.
    async fn update(&self, id: i32, payload: UserChanges) -> Result<Option<User>, UserError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, UserError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Returns `true` if an account already uses this username.
    async fn validate_username(&self, username: &str) -> Result<bool, UserError>;

    /// Returns `true` if an account already uses this email.
    async fn validate_email(&self, email: &str) -> Result<bool, UserError>;

    /// Checks an email/password pair and returns the account's username on success.
    ///
    /// A wrong password and an unknown email both yield `None`.
    async fn authenticate_by_email(&self, payload: SignInUser)
    -> Result<Option<String>, UserError>;

    /// Returns `true` if a user was deleted.
    async fn delete_by_id(&self, id: i32) -> Result<bool, UserError>;
}
