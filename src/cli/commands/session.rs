//! Login session command handlers

use crate::config::Config;
use crate::constants;
use crate::cookies::{SignedCookies, set_cookie_header};
use crate::models::user::SignInUser;
use crate::state::SharedState;

pub async fn cmd_login(config: &Config, payload: SignInUser) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let Some(username) = state.users.authenticate_by_email(payload).await? else {
        println!("Invalid email or password.");
        return state.close().await;
    };

    let token = state.sessions.set_cookie(&username).await?;

    println!("✓ Logged in as {username}");
    println!("Token: {token}");
    println!(
        "Set-Cookie: {}",
        set_cookie_header(
            constants::session::LOGIN_COOKIE,
            &token,
            &config.security.cookie_secret,
            config.cache.session_ttl_seconds,
            config.security.secure_cookies,
        )
    );

    state.close().await
}

pub async fn cmd_whoami(config: &Config, cookie_header: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let cookies = SignedCookies::from_header(cookie_header, &config.security.cookie_secret);

    let Some(id) = state.sessions.get_cookie_id(&cookies).await? else {
        println!("Not logged in.");
        return state.close().await;
    };

    match state.users.get_by_id(id).await? {
        Some(user) => println!("{} (ID: {}, admin: {})", user.username, user.id, user.admin),
        None => println!("Session refers to deleted user {id}."),
    }

    state.close().await
}

pub async fn cmd_logout(config: &Config, token: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    if state.sessions.del_cookie(token).await? {
        println!("✓ Logged out");
    } else {
        println!("No active session for that token.");
    }

    state.close().await
}
