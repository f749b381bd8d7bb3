//! User account command handlers

use crate::config::Config;
use crate::models::user::{NewUser, User, UserUpdate};
use crate::state::SharedState;

fn print_user(user: &User) {
    println!("{} (ID: {})", user.username, user.id);
    println!("  Email: {}", user.email);
    if let Some(bio) = &user.bio {
        println!("  Bio:   {bio}");
    }
    println!("  Admin: {}", if user.admin { "yes" } else { "no" });
    if let Some(sso) = &user.sso {
        println!("  SSO:   {sso}");
    }
}

pub async fn cmd_user_create(config: &Config, payload: NewUser) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let dto = state.users.create_user_salt_hash(payload);
    match state.users.create(dto).await? {
        Some(user) => {
            println!("✓ Created user");
            print_user(&user);
        }
        None => println!("Username or email is already registered."),
    }

    state.close().await
}

pub async fn cmd_user_show(config: &Config, user: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let found = match user.parse::<i32>() {
        Ok(id) => state.users.get_by_id(id).await?,
        Err(_) => state.users.get_by_username(user).await?,
    };

    match found {
        Some(user) => print_user(&user),
        None => println!("User '{user}' not found."),
    }

    state.close().await
}

pub async fn cmd_user_update(config: &Config, id: i32, payload: UserUpdate) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let password_changed = payload.password.as_deref().is_some_and(|p| !p.is_empty());
    let changes = state.users.update_user_salt_hash(payload);

    match state.users.update(id, changes).await? {
        Some(user) => {
            println!("✓ Updated user");
            print_user(&user);
            if password_changed {
                println!("  Password changed.");
            }
        }
        None => println!("User with ID {id} not found."),
    }

    state.close().await
}

pub async fn cmd_user_delete(config: &Config, id: i32, yes: bool) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let Some(user) = state.users.get_by_id(id).await? else {
        println!("User with ID {id} not found.");
        return state.close().await;
    };

    if !yes {
        println!("Delete '{}' (ID: {})?", user.username, user.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return state.close().await;
        }
    }

    if state.users.delete_by_id(id).await? {
        println!("✓ Deleted: {}", user.username);
    } else {
        println!("Failed to delete user.");
    }

    state.close().await
}

pub async fn cmd_user_check(
    config: &Config,
    username: Option<&str>,
    email: Option<&str>,
) -> anyhow::Result<()> {
    if username.is_none() && email.is_none() {
        println!("Usage: scriptdesk user check [--username <name>] [--email <address>]");
        return Ok(());
    }

    let state = SharedState::new(config.clone()).await?;

    if let Some(username) = username {
        let taken = state.users.validate_username(username).await?;
        println!(
            "Username '{username}': {}",
            if taken { "taken" } else { "available" }
        );
    }

    if let Some(email) = email {
        let taken = state.users.validate_email(email).await?;
        println!(
            "Email '{email}': {}",
            if taken { "taken" } else { "available" }
        );
    }

    state.close().await
}
