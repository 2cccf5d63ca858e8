//! CLI module for Shop Users
//!
//! Provides subcommands for exercising the user aggregate from a shell:
//! - `register`: register a user in a process-local store and print it
//! - `check`: run the phone and email format checks only

pub mod check;
pub mod register;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Shop Users - user aggregate with addresses, roles and wallets
#[derive(Parser)]
#[command(name = "shop-users")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a user and print it as JSON
    Register(register::RegisterArgs),

    /// Validate a phone number and optional email
    Check(check::CheckArgs),
}

/// Load configuration and install logging
pub fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);
    config
}
