//! Conversions between user payloads, persisted rows and the public view.

use crate::models::user::{CreateUser, NewUser, User, UserChanges, UserRecord, UserUpdate};
use crate::services::password::salt_hash;

/// Attach a fresh salt and hash to a sign-up payload. New accounts are never admins.
#[must_use]
pub fn to_create_user(payload: NewUser) -> CreateUser {
    let credentials = salt_hash(&payload.password, None);

    CreateUser {
        id: payload.id,
        email: payload.email,
        username: payload.username,
        password_salt: credentials.salt,
        password_hash: credentials.hex_hash,
        bio: payload.bio,
        sso: None,
        admin: false,
    }
}

/// Replace a plaintext password with new credentials. Without a password the
/// other fields pass through as they are.
#[must_use]
pub fn to_user_changes(payload: UserUpdate) -> UserChanges {
    let UserUpdate {
        email,
        username,
        bio,
        admin,
        sso,
        password,
    } = payload;

    let (password_salt, password_hash) = match password.filter(|p| !p.is_empty()) {
        Some(password) => {
            let credentials = salt_hash(&password, None);
            (Some(credentials.salt), Some(credentials.hex_hash))
        }
        None => (None, None),
    };

    UserChanges {
        email,
        username,
        bio,
        admin,
        sso,
        password_salt,
        password_hash,
    }
}

#[must_use]
pub fn to_user(record: UserRecord) -> User {
    User {
        id: record.id,
        email: record.email,
        username: record.username,
        bio: record.bio,
        admin: record.admin,
        sso: record.sso,
    }
}
