//! Database migration commands.

use clap::{Args, Subcommand};

use clubhub_core::config::AppConfig;
use clubhub_core::error::AppError;
use clubhub_database::migration::run_migrations;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match args.command {
        MigrateCommand::Run => {
            let db = super::connect(config).await?;
            println!("Running database migrations...");
            run_migrations(db.pool()).await?;
            db.close().await;
            output::print_success("All migrations applied.");
        }
    }
    Ok(())
}
