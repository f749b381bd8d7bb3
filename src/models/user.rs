use serde::{Deserialize, Serialize};

use crate::entities::users;

/// A user row as persisted, credentials included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub bio: Option<String>,
    pub admin: bool,
    pub sso: Option<String>,
    pub password_salt: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for UserRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            bio: model.bio,
            admin: model.admin,
            sso: model.sso,
            password_salt: model.password_salt,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Externally visible user. Never carries salt or hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub bio: Option<String>,
    pub admin: bool,
    pub sso: Option<String>,
}

/// Sign-up payload as received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<i32>,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Creation payload with credentials attached, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub id: Option<i32>,
    pub email: String,
    pub username: String,
    pub password_salt: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub sso: Option<String>,
    pub admin: bool,
}

/// Partial update as received from a client. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub admin: Option<bool>,
    pub sso: Option<String>,
    pub password: Option<String>,
}

/// Partial update ready to persist. Salt and hash are either both set or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub admin: Option<bool>,
    pub sso: Option<String>,
    pub password_salt: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInUser {
    pub email: String,
    pub password: String,
}

/// Identity stored in the cache under a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub username: String,
    pub id: i32,
    pub is_admin: bool,
}

impl From<&UserRecord> for SessionIdentity {
    fn from(user: &UserRecord) -> Self {
        Self {
            username: user.username.clone(),
            id: user.id,
            is_admin: user.admin,
        }
    }
}
