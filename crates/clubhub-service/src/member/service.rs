//! A member's own account and profile.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use clubhub_auth::rbac::{Action, AuthorizationGate, Resource, Target};
use clubhub_core::error::AppError;
use clubhub_core::types::MemberId;
use clubhub_database::store::MemberStore;
use clubhub_entity::member::{Member, Profile, UpdateProfile};

use crate::context::RequestContext;
use crate::{optional, required};

/// A member together with their profile.
#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    /// The account.
    pub member: Member,
    /// The profile, when one exists.
    pub profile: Option<Profile>,
}

/// Profile operations.
#[derive(Debug, Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStore>,
    gate: Arc<AuthorizationGate>,
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(members: Arc<dyn MemberStore>, gate: Arc<AuthorizationGate>) -> Self {
        Self { members, gate }
    }

    /// The caller's own account and profile.
    pub async fn me(&self, ctx: &RequestContext) -> Result<MemberView, AppError> {
        let identity = ctx.identity()?;
        self.get(ctx, identity.member_id).await
    }

    /// Read a member. Members may read themselves; super admins anyone.
    pub async fn get(&self, ctx: &RequestContext, id: MemberId) -> Result<MemberView, AppError> {
        self.gate.require(
            &ctx.actor,
            Resource::Member,
            Action::Read,
            Some(&Target::owned_by(id)),
        )?;

        let member = self
            .members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member {id} not found")))?;
        let profile = self.members.find_profile(id).await?;

        Ok(MemberView { member, profile })
    }

    /// Edit a profile. Saving both names marks the profile complete.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        id: MemberId,
        req: UpdateProfile,
    ) -> Result<Profile, AppError> {
        self.gate.require(
            &ctx.actor,
            Resource::Member,
            Action::Edit,
            Some(&Target::owned_by(id)),
        )?;

        let data = UpdateProfile {
            first_name: req
                .first_name
                .map(|v| required("First name", &v))
                .transpose()?,
            last_name: req
                .last_name
                .map(|v| required("Last name", &v))
                .transpose()?,
            bio: req.bio.as_deref().map(|v| v.trim().to_string()),
            avatar_url: optional(req.avatar_url.as_deref()),
        };

        let profile = self.members.update_profile(id, &data).await?;
        info!(member_id = %id, editor = ?ctx.member_id(), complete = profile.is_complete(), "Profile updated");
        Ok(profile)
    }
}
