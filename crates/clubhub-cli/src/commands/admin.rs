//! Super admin bootstrap.
//!
//! The first super admin cannot be invited by anybody, so it is created
//! here, straight against the member store.

use clap::{Args, Subcommand};

use clubhub_auth::password::{PasswordHasher, PasswordValidator};
use clubhub_core::config::AppConfig;
use clubhub_core::error::AppError;
use clubhub_entity::member::{CreateMember, CreateProfile, MemberRole};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create a super admin account
    Create {
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Given name
        #[arg(long)]
        first_name: Option<String>,
        /// Family name
        #[arg(long)]
        last_name: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            email,
            first_name,
            last_name,
            password,
        } => {
            let email = super::text_or_prompt(email, "Email")?.trim().to_lowercase();
            let first_name = super::text_or_prompt(first_name, "First name")?;
            let last_name = super::text_or_prompt(last_name, "Last name")?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            PasswordValidator::new(&config.auth).validate(
                &password,
                &[email.as_str(), first_name.as_str(), last_name.as_str()],
            )?;
            let password_hash = PasswordHasher::new().hash_password(&password)?;

            let db = super::connect(config).await?;
            let stores = db.stores();
            if stores.members.find_by_email(&email).await?.is_some() {
                return Err(AppError::conflict(format!(
                    "A member with email '{email}' already exists"
                )));
            }

            let (member, _) = stores
                .members
                .create(
                    &CreateMember {
                        email,
                        password_hash,
                        role: MemberRole::SuperAdmin,
                        invited_by: None,
                    },
                    &CreateProfile {
                        first_name,
                        last_name,
                    },
                )
                .await?;
            db.close().await;

            output::print_success("Super admin created");
            output::print_kv("id", &member.id.to_string());
            output::print_kv("email", &member.email);
        }
    }
    Ok(())
}
