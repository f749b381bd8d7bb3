//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::models::user::{CreateUser, SignInUser, User, UserChanges};
use crate::services::password::salt_hash;
use crate::services::user_mapper::to_user;
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create(&self, payload: CreateUser) -> Result<Option<User>, UserError> {
        let user = self.store.create_user(&payload).await?;

        if let Some(user) = &user {
            info!(user_id = user.id, username = %user.username, "User created");
        }

        Ok(user.map(to_user))
    }

    async fn update(&self, id: i32, payload: UserChanges) -> Result<Option<User>, UserError> {
        let rehashed = payload.password_hash.is_some();
        let user = self.store.update_user(id, &payload).await?;

        if user.is_some() {
            info!(user_id = id, rehashed, "User updated");
        }

        Ok(user.map(to_user))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, UserError> {
        let user = self.store.get_user_by_id(id).await?;
        Ok(user.map(to_user))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let user = self.store.get_user_by_username(username).await?;
        Ok(user.map(to_user))
    }

    async fn validate_username(&self, username: &str) -> Result<bool, UserError> {
        Ok(self.store.username_exists(username).await?)
    }

    async fn validate_email(&self, email: &str) -> Result<bool, UserError> {
        Ok(self.store.email_exists(email).await?)
    }

    async fn authenticate_by_email(
        &self,
        payload: SignInUser,
    ) -> Result<Option<String>, UserError> {
        // Unknown emails are hashed with a throwaway salt so they fail the same way
        let salt = self.store.get_salt_by_email(&payload.email).await?;
        let hash = salt_hash(&payload.password, salt.as_deref()).hex_hash;

        let username = self
            .store
            .authenticate_by_email(&payload.email, &hash)
            .await?;

        if username.is_none() {
            debug!("Authentication failed");
        }

        Ok(username)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, UserError> {
        let deleted = self.store.delete_user(id).await?;

        if deleted {
            info!(user_id = id, "User deleted");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{NewUser, UserUpdate};

    async fn service() -> SeaOrmUserService {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .unwrap();
        SeaOrmUserService::new(store)
    }

    fn new_user(username: &str, email: &str, password: &str) -> NewUser {
        NewUser {
            id: None,
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            bio: None,
        }
    }

    async fn register(service: &SeaOrmUserService, username: &str, email: &str) -> User {
        let dto = service.create_user_salt_hash(new_user(username, email, "hunter2"));
        service.create(dto).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn create_and_lookup() {
        let service = service().await;
        let user = register(&service, "ada", "ada@example.com").await;

        assert!(!user.admin);
        assert_eq!(
            service.get_by_id(user.id).await.unwrap().as_ref(),
            Some(&user)
        );
        assert_eq!(
            service.get_by_username("ada").await.unwrap().as_ref(),
            Some(&user)
        );
        assert!(service.get_by_id(user.id + 1).await.unwrap().is_none());
        assert!(service.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_absent() {
        let service = service().await;
        register(&service, "ada", "ada@example.com").await;

        let dup_name = service.create_user_salt_hash(new_user("ada", "other@example.com", "x"));
        assert!(service.create(dup_name).await.unwrap().is_none());

        let dup_email = service.create_user_salt_hash(new_user("other", "ada@example.com", "x"));
        assert!(service.create(dup_email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn validate_reports_existing_values() {
        let service = service().await;
        register(&service, "ada", "ada@example.com").await;

        assert!(service.validate_username("ada").await.unwrap());
        assert!(!service.validate_username("bob").await.unwrap());
        assert!(service.validate_email("ada@example.com").await.unwrap());
        assert!(!service.validate_email("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn authenticate_by_email() {
        let service = service().await;
        register(&service, "ada", "ada@example.com").await;

        let ok = service
            .authenticate_by_email(SignInUser {
                email: "ada@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.as_deref(), Some("ada"));

        let wrong_password = service
            .authenticate_by_email(SignInUser {
                email: "ada@example.com".to_string(),
                password: "hunter3".to_string(),
            })
            .await
            .unwrap();
        assert!(wrong_password.is_none());

        let unknown = service
            .authenticate_by_email(SignInUser {
                email: "nobody@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn update_keeps_credentials_without_password() {
        let service = service().await;
        let user = register(&service, "ada", "ada@example.com").await;

        let changes = service.update_user_salt_hash(UserUpdate {
            bio: Some("mathematician".to_string()),
            ..UserUpdate::default()
        });
        let updated = service.update(user.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.bio.as_deref(), Some("mathematician"));

        let still_valid = service
            .authenticate_by_email(SignInUser {
                email: "ada@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert!(still_valid.is_some());
    }

    #[tokio::test]
    async fn update_with_password_replaces_credentials() {
        let service = service().await;
        let user = register(&service, "ada", "ada@example.com").await;

        let changes = service.update_user_salt_hash(UserUpdate {
            password: Some("new-secret".to_string()),
            ..UserUpdate::default()
        });
        service.update(user.id, changes).await.unwrap().unwrap();

        let old = service
            .authenticate_by_email(SignInUser {
                email: "ada@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert!(old.is_none());

        let new = service
            .authenticate_by_email(SignInUser {
                email: "ada@example.com".to_string(),
                password: "new-secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(new.as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_absent() {
        let service = service().await;
        let changes = service.update_user_salt_hash(UserUpdate::default());
        assert!(service.update(99, changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_to_taken_username_or_email_is_absent() {
        let service = service().await;
        register(&service, "ada", "ada@example.com").await;
        let bob = register(&service, "bob", "bob@example.com").await;

        let rename = service.update_user_salt_hash(UserUpdate {
            username: Some("ada".to_string()),
            ..UserUpdate::default()
        });
        assert!(service.update(bob.id, rename).await.unwrap().is_none());

        let readdress = service.update_user_salt_hash(UserUpdate {
            email: Some("ada@example.com".to_string()),
            ..UserUpdate::default()
        });
        assert!(service.update(bob.id, readdress).await.unwrap().is_none());

        let unchanged = service.get_by_id(bob.id).await.unwrap().unwrap();
        assert_eq!(unchanged, bob);
    }

    #[tokio::test]
    async fn update_may_keep_own_username_and_email() {
        let service = service().await;
        let ada = register(&service, "ada", "ada@example.com").await;

        let changes = service.update_user_salt_hash(UserUpdate {
            username: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
            bio: Some("analyst".to_string()),
            ..UserUpdate::default()
        });
        let updated = service.update(ada.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.bio.as_deref(), Some("analyst"));
    }

    #[tokio::test]
    async fn database_faults_keep_their_cause() {
        use sea_orm::ConnectionTrait;

        let service = service().await;
        service
            .store
            .conn
            .execute_unprepared("DROP TABLE users")
            .await
            .unwrap();

        match service.get_by_id(1).await {
            Err(UserError::Database(msg)) => {
                assert!(msg.starts_with("Failed to query user by ID: "));
                assert!(msg.contains("no such table"));
            }
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_by_id() {
        let service = service().await;
        let user = register(&service, "ada", "ada@example.com").await;

        assert!(service.delete_by_id(user.id).await.unwrap());
        assert!(!service.delete_by_id(user.id).await.unwrap());
        assert!(service.get_by_id(user.id).await.unwrap().is_none());
    }
}
