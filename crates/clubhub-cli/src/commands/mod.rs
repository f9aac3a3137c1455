//! CLI command definitions and dispatch.

pub mod admin;
pub mod invite;
pub mod member;
pub mod migrate;

use clap::{Parser, Subcommand};

use clubhub_core::config::{AppConfig, ENV_SELECTOR};
use clubhub_core::error::AppError;
use clubhub_database::DatabasePool;

use crate::output::OutputFormat;

/// ClubHub administration
#[derive(Debug, Parser)]
#[command(name = "clubhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load (`config/{env}.toml`)
    #[arg(short, long, env = ENV_SELECTOR, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Super admin bootstrap
    Admin(admin::AdminArgs),
    /// Member listing
    Member(member::MemberArgs),
    /// Invitation issuing
    Invite(invite::InviteArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Admin(args) => admin::execute(args, &config).await,
            Commands::Member(args) => member::execute(args, &config, self.format).await,
            Commands::Invite(args) => invite::execute(args, &config).await,
        }
    }
}

/// Open the database pool described by `config`.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Prompt for a line of text unless it was given on the command line.
pub fn text_or_prompt(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}
