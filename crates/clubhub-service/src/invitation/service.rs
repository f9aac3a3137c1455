//! Issuing and redeeming single-use invitations.
//!
//! An invitation is `pending` until redeemed or until `expires_at` passes;
//! both outcomes are terminal. Expiry is evaluated at lookup time, nothing
//! sweeps old rows.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::ValidateEmail;

use clubhub_auth::password::{PasswordHasher, PasswordValidator};
use clubhub_auth::rbac::{Action, AuthorizationGate, Resource};
use clubhub_auth::token::{generate_token, hash_token};
use clubhub_core::config::auth::AuthConfig;
use clubhub_core::config::invitation::InvitationConfig;
use clubhub_core::error::AppError;
use clubhub_core::types::InvitationId;
use clubhub_database::store::{InvitationStore, MemberStore};
use clubhub_entity::invitation::{CreateInvitation, Invitation, InvitationState, Redemption};
use clubhub_entity::member::{CreateMember, CreateProfile, Member, MemberRole, Profile};

use crate::context::RequestContext;
use crate::required;

/// Who to invite and with which role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvitation {
    /// Invitee email.
    pub email: String,
    /// Role granted on redemption. `member` or `admin`.
    #[serde(default)]
    pub role: MemberRole,
}

/// A freshly issued invitation together with its plain token.
///
/// The token is never stored and cannot be recovered later.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedInvitation {
    /// The stored invitation.
    pub invitation: Invitation,
    /// The single-use token to hand to the invitee.
    pub token: String,
}

/// What the invitee supplies to join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemInvitation {
    /// The token from the invitation.
    pub token: String,
    /// New account password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Invitation operations.
#[derive(Debug, Clone)]
pub struct InvitationService {
    invitations: Arc<dyn InvitationStore>,
    members: Arc<dyn MemberStore>,
    gate: Arc<AuthorizationGate>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    ttl: Duration,
    token_bytes: usize,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(
        invitations: Arc<dyn InvitationStore>,
        members: Arc<dyn MemberStore>,
        gate: Arc<AuthorizationGate>,
        auth: &AuthConfig,
        config: &InvitationConfig,
    ) -> Self {
        Self {
            invitations,
            members,
            gate,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(auth),
            ttl: Duration::days(config.ttl_days),
            token_bytes: config.token_bytes,
        }
    }

    /// Issue an invitation. Super admins only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: NewInvitation,
    ) -> Result<IssuedInvitation, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Invitation, Action::Create, None)?;

        let email = req.email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(AppError::validation("A valid email address is required"));
        }
        if req.role == MemberRole::SuperAdmin {
            return Err(AppError::validation(
                "Invitations can only grant the member or admin role",
            ));
        }
        if self.members.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("A member with this email already exists"));
        }

        let token = generate_token(self.token_bytes);
        let invitation = self
            .invitations
            .create(&CreateInvitation {
                email,
                role: req.role,
                invited_by: identity.member_id,
                token_hash: hash_token(&token),
                expires_at: ctx.request_time + self.ttl,
            })
            .await?;

        info!(
            invitation_id = %invitation.id,
            role = %invitation.role,
            invited_by = %identity.member_id,
            expires_at = %invitation.expires_at,
            "Invitation issued"
        );
        Ok(IssuedInvitation { invitation, token })
    }

    /// Every invitation, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Invitation>, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Invitation, Action::List, None)?;
        self.invitations.list().await
    }

    /// Withdraw an invitation.
    pub async fn delete(&self, ctx: &RequestContext, id: InvitationId) -> Result<(), AppError> {
        self.gate
            .require(&ctx.actor, Resource::Invitation, Action::Delete, None)?;
        if self.invitations.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found(format!("Invitation {id} not found")));
        }
        self.invitations.delete(id).await?;
        info!(invitation_id = %id, member_id = ?ctx.member_id(), "Invitation deleted");
        Ok(())
    }

    /// Find a still-pending invitation by its plain token.
    pub async fn lookup(&self, ctx: &RequestContext, token: &str) -> Result<Invitation, AppError> {
        let invitation = self
            .invitations
            .find_by_token_hash(&hash_token(token.trim()))
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        match invitation.state_at(ctx.request_time) {
            InvitationState::Pending => Ok(invitation),
            InvitationState::Redeemed => Err(AppError::token_already_used(
                "This invitation has already been used",
            )),
            InvitationState::Expired => Err(AppError::token_expired("This invitation has expired")),
        }
    }

    /// Redeem an invitation: create the member with the invited role and
    /// its profile, and consume the token, all at once. Needs no session.
    pub async fn redeem(
        &self,
        ctx: &RequestContext,
        req: RedeemInvitation,
    ) -> Result<(Member, Profile), AppError> {
        let invitation = self.lookup(ctx, &req.token).await?;

        let first_name = required("First name", &req.first_name)?;
        let last_name = required("Last name", &req.last_name)?;
        self.validator.validate(
            &req.password,
            &[invitation.email.as_str(), first_name.as_str(), last_name.as_str()],
        )?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let redemption = Redemption {
            invitation_id: invitation.id,
            member: CreateMember {
                email: invitation.email.clone(),
                password_hash,
                role: invitation.role,
                invited_by: Some(invitation.invited_by),
            },
            profile: CreateProfile {
                first_name,
                last_name,
            },
        };

        match self.invitations.redeem(&redemption).await {
            Ok((member, profile)) => {
                info!(
                    invitation_id = %invitation.id,
                    member_id = %member.id,
                    role = %member.role,
                    "Invitation redeemed"
                );
                Ok((member, profile))
            }
            Err(e) => {
                warn!(invitation_id = %invitation.id, error = %e, "Invitation redemption failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use clubhub_core::error::ErrorKind;
    use clubhub_database::Stores;

    use super::*;
    use crate::testing::{gate, sign_up};

    const PASSWORD: &str = "Quartz-Fjord-Nebula-73";

    fn service(stores: &Stores) -> InvitationService {
        InvitationService::new(
            stores.invitations.clone(),
            stores.members.clone(),
            gate(),
            &AuthConfig::default(),
            &InvitationConfig::default(),
        )
    }

    fn invite(email: &str, role: MemberRole) -> NewInvitation {
        NewInvitation {
            email: email.into(),
            role,
        }
    }

    fn redeem(token: &str) -> RedeemInvitation {
        RedeemInvitation {
            token: token.into(),
            password: PASSWORD.into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        }
    }

    #[tokio::test]
    async fn test_only_super_admin_invites() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, admin) = sign_up(&stores, "root@club.test", MemberRole::Admin).await;

        let err = service
            .create(&admin, invite("new@club.test", MemberRole::Member))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InsufficientRole);
    }

    #[tokio::test]
    async fn test_cannot_invite_super_admin_or_existing_member() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;

        let err = service
            .create(&boss, invite("new@club.test", MemberRole::SuperAdmin))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .create(&boss, invite("BOSS@club.test", MemberRole::Member))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = service
            .create(&boss, invite("not-an-email", MemberRole::Member))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_redeem_creates_member_with_invited_role() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (boss_member, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;

        let issued = service
            .create(&boss, invite("Grace@Club.test", MemberRole::Admin))
            .await
            .unwrap();
        assert_eq!(issued.invitation.email, "grace@club.test");
        assert_ne!(issued.invitation.token_hash, issued.token);

        let (member, profile) = service
            .redeem(&RequestContext::anonymous(), redeem(&issued.token))
            .await
            .unwrap();
        assert_eq!(member.role, MemberRole::Admin);
        assert_eq!(member.invited_by, Some(boss_member.id));
        assert_eq!(profile.member_id, member.id);
        assert_eq!(profile.first_name, "Grace");
    }

    #[tokio::test]
    async fn test_second_redemption_fails() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;
        let issued = service
            .create(&boss, invite("grace@club.test", MemberRole::Member))
            .await
            .unwrap();

        let anon = RequestContext::anonymous();
        service.redeem(&anon, redeem(&issued.token)).await.unwrap();
        let err = service.redeem(&anon, redeem(&issued.token)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenAlreadyUsed);
        assert_eq!(stores.members.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_create_one_member() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;
        let issued = service
            .create(&boss, invite("grace@club.test", MemberRole::Member))
            .await
            .unwrap();
        let before = stores.members.count().await.unwrap();

        let anon = RequestContext::anonymous();
        let (first, second) = tokio::join!(
            service.redeem(&anon, redeem(&issued.token)),
            service.redeem(&anon, redeem(&issued.token)),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let err = results
            .into_iter()
            .find_map(Result::err)
            .expect("one redemption must lose");
        assert_eq!(err.kind, ErrorKind::TokenAlreadyUsed);
        assert_eq!(stores.members.count().await.unwrap(), before + 1);
    }

    #[tokio::test]
    async fn test_email_rule_matches_request_validation() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;

        for bad in ["foo", "@club.test", "a@b@club.test", "grace@"] {
            let err = service
                .create(&boss, invite(bad, MemberRole::Member))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{bad}");
        }
        service
            .create(&boss, invite("grace.hopper+club@mail.club.test", MemberRole::Member))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_expired_invitation_fails_even_if_unused() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;
        let issued = service
            .create(&boss, invite("grace@club.test", MemberRole::Member))
            .await
            .unwrap();

        let mut later = RequestContext::anonymous();
        later.request_time = Utc::now() + Duration::days(8);
        let err = service.redeem(&later, redeem(&issued.token)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[tokio::test]
    async fn test_weak_password_leaves_invitation_redeemable() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;
        let issued = service
            .create(&boss, invite("grace@club.test", MemberRole::Member))
            .await
            .unwrap();

        let anon = RequestContext::anonymous();
        let err = service
            .redeem(
                &anon,
                RedeemInvitation {
                    password: "password".into(),
                    ..redeem(&issued.token)
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        service.redeem(&anon, redeem(&issued.token)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_token_and_delete() {
        let stores = Stores::memory();
        let service = service(&stores);
        let (_, boss) = sign_up(&stores, "boss@club.test", MemberRole::SuperAdmin).await;

        let err = service
            .redeem(&RequestContext::anonymous(), redeem("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let issued = service
            .create(&boss, invite("grace@club.test", MemberRole::Member))
            .await
            .unwrap();
        assert_eq!(service.list(&boss).await.unwrap().len(), 1);
        service.delete(&boss, issued.invitation.id).await.unwrap();
        assert!(service.list(&boss).await.unwrap().is_empty());
        let err = service.delete(&boss, issued.invitation.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
