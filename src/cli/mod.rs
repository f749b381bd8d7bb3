//! CLI module - Command-line interface for scriptdesk
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// scriptdesk - user accounts and login sessions
#[derive(Parser)]
#[command(name = "scriptdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage user accounts
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Check an email/password pair and open a session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Resolve a Cookie header to the logged-in user
    Whoami {
        /// Raw Cookie header, e.g. "loginToken=s%3A..."
        #[arg(long)]
        cookie: String,
    },

    /// End a session
    Logout {
        /// Session token printed by `login`
        token: String,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new account
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Show an account by ID or username
    Show {
        /// Numeric ID or username
        user: String,
    },

    /// Change account fields; omitted fields are left alone
    Update {
        id: i32,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        admin: Option<bool>,
    },

    /// Delete an account
    #[command(alias = "rm")]
    Delete {
        id: i32,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Report whether a username or email is already registered
    Check {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}
