pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod cookies;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, UserCommands, commands};
pub use config::Config;
use models::user::{NewUser, SignInUser, UserUpdate};
pub use state::SharedState;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("Config file already exists.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::User { command } => run_user_command(&config, command).await,

        Commands::Login { email, password } => {
            commands::cmd_login(&config, SignInUser { email, password }).await
        }

        Commands::Whoami { cookie } => commands::cmd_whoami(&config, &cookie).await,

        Commands::Logout { token } => commands::cmd_logout(&config, &token).await,

        Commands::Init => Ok(()),
    }
}

async fn run_user_command(config: &Config, command: UserCommands) -> anyhow::Result<()> {
    match command {
        UserCommands::Create {
            email,
            username,
            password,
            bio,
        } => {
            let payload = NewUser {
                id: None,
                email,
                username,
                password,
                bio,
            };
            commands::cmd_user_create(config, payload).await
        }

        UserCommands::Show { user } => commands::cmd_user_show(config, &user).await,

        UserCommands::Update {
            id,
            email,
            username,
            bio,
            password,
            admin,
        } => {
            let payload = UserUpdate {
                email,
                username,
                bio,
                admin,
                sso: None,
                password,
            };
            commands::cmd_user_update(config, id, payload).await
        }

        UserCommands::Delete { id, yes } => commands::cmd_user_delete(config, id, yes).await,

        UserCommands::Check { username, email } => {
            commands::cmd_user_check(config, username.as_deref(), email.as_deref()).await
        }
    }
}
