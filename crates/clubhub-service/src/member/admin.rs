//! Member administration: listing, role changes, removal.

use std::sync::Arc;

use tracing::{info, warn};

use clubhub_auth::rbac::{Action, AuthorizationGate, Resource};
use clubhub_core::error::AppError;
use clubhub_core::types::MemberId;
use clubhub_database::store::MemberStore;
use clubhub_entity::member::{Member, MemberRole};

use crate::context::RequestContext;

/// Super-admin member management.
#[derive(Debug, Clone)]
pub struct AdminMemberService {
    members: Arc<dyn MemberStore>,
    gate: Arc<AuthorizationGate>,
}

impl AdminMemberService {
    /// Creates a new admin member service.
    pub fn new(members: Arc<dyn MemberStore>, gate: Arc<AuthorizationGate>) -> Self {
        Self { members, gate }
    }

    /// Every member, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Member>, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Member, Action::List, None)?;
        self.members.list().await
    }

    /// Change a member's role. The caller's own role cannot be changed here.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        id: MemberId,
        role: MemberRole,
    ) -> Result<Member, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Member, Action::ChangeRole, None)?;
        if identity.member_id == id {
            return Err(AppError::validation("You cannot change your own role"));
        }

        let member = self.find(id).await?;
        if member.role == role {
            return Ok(member);
        }

        let updated = self.members.update_role(id, role).await?;
        info!(
            member_id = %id,
            from = %member.role,
            to = %role,
            changed_by = %identity.member_id,
            "Member role changed"
        );
        Ok(updated)
    }

    /// Remove a member with their sessions, profile and content.
    pub async fn delete(&self, ctx: &RequestContext, id: MemberId) -> Result<(), AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Member, Action::Delete, None)?;
        if identity.member_id == id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        let member = self.find(id).await?;
        self.members.delete(id).await?;
        warn!(member_id = %id, email = %member.email, deleted_by = %identity.member_id, "Member deleted");
        Ok(())
    }

    async fn find(&self, id: MemberId) -> Result<Member, AppError> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member {id} not found")))
    }
}
