//! Issue an invitation from the command line.

use std::sync::Arc;

use clap::{Args, Subcommand};
use tracing::info;

use clubhub_auth::actor::{Actor, Identity};
use clubhub_auth::rbac::AuthorizationGate;
use clubhub_core::config::AppConfig;
use clubhub_core::error::AppError;
use clubhub_core::types::SessionId;
use clubhub_database::Stores;
use clubhub_entity::member::MemberRole;
use clubhub_service::invitation::{IssuedInvitation, NewInvitation};
use clubhub_service::{InvitationService, RequestContext};

use crate::output;

/// Arguments for invite commands
#[derive(Debug, Args)]
pub struct InviteArgs {
    /// Invite subcommand
    #[command(subcommand)]
    pub command: InviteCommand,
}

/// Invite subcommands
#[derive(Debug, Subcommand)]
pub enum InviteCommand {
    /// Issue a new invitation and print its token
    Create {
        /// Invitee email
        #[arg(short, long)]
        email: String,
        /// Role granted on redemption
        #[arg(short, long, default_value = "member")]
        role: MemberRole,
        /// Email of the issuing super admin
        #[arg(long = "by")]
        issuer: String,
    },
}

/// Execute invite commands
pub async fn execute(args: &InviteArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        InviteCommand::Create {
            email,
            role,
            issuer,
        } => {
            let db = super::connect(config).await?;
            let issued = issue(&db.stores(), config, issuer, email, *role).await;
            db.close().await;
            let IssuedInvitation { invitation, token } = issued?;

            info!(invitation_id = %invitation.id, "Invitation issued from CLI");
            output::print_success("Invitation issued");
            output::print_kv("email", &invitation.email);
            output::print_kv("role", invitation.role.as_str());
            output::print_kv("expires", &invitation.expires_at.to_rfc3339());
            output::print_kv("token", &token);
        }
    }
    Ok(())
}

/// Issue an invitation on behalf of the member registered as `issuer`.
///
/// Runs outside any web session: the issuer acts with their stored role
/// and the authorization gate decides.
async fn issue(
    stores: &Stores,
    config: &AppConfig,
    issuer: &str,
    email: &str,
    role: MemberRole,
) -> Result<IssuedInvitation, AppError> {
    let issuer = stores
        .members
        .find_by_email(&issuer.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found("No member with that email"))?;

    let ctx = RequestContext::new(
        Actor::Member(Identity {
            member_id: issuer.id,
            session_id: SessionId::new(),
            role: issuer.role,
            email: issuer.email,
        }),
        Some(format!("clubhub-cli/{}", env!("CARGO_PKG_VERSION"))),
    );
    let service = InvitationService::new(
        Arc::clone(&stores.invitations),
        Arc::clone(&stores.members),
        Arc::new(AuthorizationGate::new()),
        &config.auth,
        &config.invitation,
    );

    service
        .create(
            &ctx,
            NewInvitation {
                email: email.to_string(),
                role,
            },
        )
        .await
}
