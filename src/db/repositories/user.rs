use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, Set,
};
use tracing::debug;

use crate::entities::users;
use crate::models::user::{CreateUser, UserChanges, UserRecord};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new user. Returns `None` when the username or email is already taken.
    pub async fn create(&self, user: &CreateUser) -> Result<Option<UserRecord>> {
        let taken = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(&user.username))
                    .add(users::Column::Email.eq(&user.email)),
            )
            .count(&self.conn)
            .await
            .context("Failed to check username/email availability")?;

        if taken > 0 {
            debug!(username = %user.username, "Username or email already registered");
            return Ok(None);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            id: user.id.map_or(NotSet, Set),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            bio: Set(user.bio.clone()),
            admin: Set(user.admin),
            sso: Set(user.sso.clone()),
            password_salt: Set(user.password_salt.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(Some(UserRecord::from(model)))
    }

    /// Apply a partial update. Returns `None` when no user has this id, or when
    /// the new username or email belongs to another account.
    pub async fn update(&self, id: i32, changes: &UserChanges) -> Result<Option<UserRecord>> {
        let Some(user) = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(None);
        };

        let mut clash = Condition::any();
        if let Some(username) = &changes.username {
            clash = clash.add(users::Column::Username.eq(username));
        }
        if let Some(email) = &changes.email {
            clash = clash.add(users::Column::Email.eq(email));
        }

        if !clash.is_empty() {
            let taken = users::Entity::find()
                .filter(clash)
                .filter(users::Column::Id.ne(id))
                .count(&self.conn)
                .await
                .context("Failed to check username/email availability")?;

            if taken > 0 {
                debug!(user_id = id, "Username or email already registered to another user");
                return Ok(None);
            }
        }

        let mut active: users::ActiveModel = user.into();

        if let Some(email) = &changes.email {
            active.email = Set(email.clone());
        }
        if let Some(username) = &changes.username {
            active.username = Set(username.clone());
        }
        if let Some(bio) = &changes.bio {
            active.bio = Set(Some(bio.clone()));
        }
        if let Some(admin) = changes.admin {
            active.admin = Set(admin);
        }
        if let Some(sso) = &changes.sso {
            active.sso = Set(Some(sso.clone()));
        }
        if let (Some(salt), Some(hash)) = (&changes.password_salt, &changes.password_hash) {
            active.password_salt = Set(salt.clone());
            active.password_hash = Set(hash.clone());
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;

        Ok(Some(UserRecord::from(model)))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<UserRecord>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(UserRecord::from))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(UserRecord::from))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to count users by username")?;

        Ok(count > 0)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("Failed to count users by email")?;

        Ok(count > 0)
    }

    pub async fn get_salt_by_email(&self, email: &str) -> Result<Option<String>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query salt by email")?;

        Ok(user.map(|u| u.password_salt))
    }

    /// Match an email against a precomputed hash. Returns the username on success.
    pub async fn authenticate_by_email(&self, email: &str, hash: &str) -> Result<Option<String>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for authentication")?;

        let Some(user) = user else {
            return Ok(None);
        };

        if constant_time_eq(user.password_hash.as_bytes(), hash.as_bytes()) {
            Ok(Some(user.username))
        } else {
            Ok(None)
        }
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected == 1)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_time_eq_works() {
        assert!(constant_time_eq(b"abc123", b"abc123"));
        assert!(!constant_time_eq(b"abc123", b"abc124"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
