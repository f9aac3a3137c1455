//! Member listing.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use clubhub_core::config::AppConfig;
use clubhub_core::error::AppError;
use clubhub_entity::member::{Member, MemberRole};

use crate::output::{self, OutputFormat};

/// Arguments for member commands
#[derive(Debug, Args)]
pub struct MemberArgs {
    /// Member subcommand
    #[command(subcommand)]
    pub command: MemberCommand,
}

/// Member subcommands
#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// List members
    List {
        /// Only members with this role
        #[arg(short, long)]
        role: Option<MemberRole>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    id: String,
    email: String,
    role: String,
    status: String,
    profile: String,
    joined: String,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.to_string(),
            email: m.email.clone(),
            role: m.role.to_string(),
            status: m.status.to_string(),
            profile: if m.profile_completed { "complete" } else { "incomplete" }.to_string(),
            joined: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute member commands
pub async fn execute(
    args: &MemberArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        MemberCommand::List { role } => {
            let db = super::connect(config).await?;
            let members = db.stores().members.list().await?;
            db.close().await;

            let rows: Vec<MemberRow> = members
                .iter()
                .filter(|m| role.is_none_or(|r| m.role == r))
                .map(MemberRow::from)
                .collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}
