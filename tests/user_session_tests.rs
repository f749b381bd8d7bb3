//! End-to-end account and login session flows against a real database.

use scriptdesk::SharedState;
use scriptdesk::config::{CacheBackend, Config};
use scriptdesk::constants;
use scriptdesk::cookies::{SignedCookies, set_cookie_header};
use scriptdesk::models::user::{NewUser, SignInUser, UserUpdate};

const SECRET: &str = "integration-secret";

async fn spawn_state(backend: CacheBackend) -> SharedState {
    let db_path =
        std::env::temp_dir().join(format!("scriptdesk-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.cache.backend = backend;
    config.security.cookie_secret = SECRET.to_string();
    config.validate().expect("test config should be valid");

    SharedState::new(config)
        .await
        .expect("failed to create shared state")
}

async fn register(state: &SharedState, username: &str, email: &str, password: &str) -> i32 {
    let dto = state.users.create_user_salt_hash(NewUser {
        id: None,
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        bio: None,
    });

    state
        .users
        .create(dto)
        .await
        .expect("create failed")
        .expect("user should be new")
        .id
}

/// Cookie header a browser would send back after receiving `Set-Cookie`.
fn cookie_header_for(token: &str) -> String {
    let set_cookie = set_cookie_header(
        constants::session::LOGIN_COOKIE,
        token,
        SECRET,
        constants::session::TTL_SECONDS,
        true,
    );
    set_cookie
        .split(';')
        .next()
        .expect("set-cookie has a name=value pair")
        .to_string()
}

async fn login_flow(backend: CacheBackend) {
    let state = spawn_state(backend).await;
    let id = register(&state, "ada", "ada@example.com", "hunter2").await;

    let username = state
        .users
        .authenticate_by_email(SignInUser {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap()
        .expect("correct password should authenticate");
    assert_eq!(username, "ada");

    let token = state.sessions.set_cookie(&username).await.unwrap();

    let cookies = SignedCookies::from_header(&cookie_header_for(&token), SECRET);
    assert_eq!(cookies.login_token(), Some(token.as_str()));
    assert_eq!(state.sessions.get_cookie_id(&cookies).await.unwrap(), Some(id));

    let identity = state.sessions.get_session(&token).await.unwrap().unwrap();
    assert_eq!(identity.username, "ada");
    assert!(!identity.is_admin);

    // A cookie signed with another secret is ignored
    let forged = SignedCookies::from_header(&cookie_header_for(&token), "other-secret");
    assert_eq!(state.sessions.get_cookie_id(&forged).await.unwrap(), None);

    assert!(state.sessions.del_cookie(&token).await.unwrap());
    assert!(!state.sessions.del_cookie(&token).await.unwrap());
    assert_eq!(state.sessions.get_cookie_id(&cookies).await.unwrap(), None);

    state.close().await.unwrap();
}

#[tokio::test]
async fn login_flow_with_sql_cache() {
    login_flow(CacheBackend::Sql).await;
}

#[tokio::test]
async fn login_flow_with_memory_cache() {
    login_flow(CacheBackend::Memory).await;
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let state = spawn_state(CacheBackend::Memory).await;
    register(&state, "ada", "ada@example.com", "hunter2").await;

    let wrong_password = state
        .users
        .authenticate_by_email(SignInUser {
            email: "ada@example.com".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap();
    let unknown_email = state
        .users
        .authenticate_by_email(SignInUser {
            email: "nobody@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(wrong_password, None);
    assert_eq!(unknown_email, None);

    state.close().await.unwrap();
}

#[tokio::test]
async fn session_reflects_admin_flag_at_login() {
    let state = spawn_state(CacheBackend::Sql).await;
    let id = register(&state, "root", "root@example.com", "pw").await;

    let changes = state.users.update_user_salt_hash(UserUpdate {
        admin: Some(true),
        ..UserUpdate::default()
    });
    let updated = state.users.update(id, changes).await.unwrap().unwrap();
    assert!(updated.admin);

    let token = state.sessions.set_cookie("root").await.unwrap();
    let identity = state.sessions.get_session(&token).await.unwrap().unwrap();
    assert_eq!(identity.id, id);
    assert!(identity.is_admin);

    state.close().await.unwrap();
}

#[tokio::test]
async fn sessions_for_deleted_user_cannot_be_opened() {
    let state = spawn_state(CacheBackend::Sql).await;
    let id = register(&state, "gone", "gone@example.com", "pw").await;

    assert!(state.users.delete_by_id(id).await.unwrap());
    assert!(state.users.get_by_id(id).await.unwrap().is_none());
    assert!(!state.users.validate_username("gone").await.unwrap());

    let err = state.sessions.set_cookie("gone").await.unwrap_err();
    assert!(matches!(
        err,
        scriptdesk::services::SessionError::UserNotFound(_)
    ));

    state.close().await.unwrap();
}
