//! The authorization gate every gated operation passes through.
//!
//! Checks run in a fixed order and the first failure wins:
//! signed in, minimum role, ownership, moderation lock.

use std::fmt;

use serde::{Deserialize, Serialize};

use clubhub_core::error::AppError;
use clubhub_core::result::AppResult;
use clubhub_core::types::{ListScope, MemberId};
use clubhub_entity::blog::{Blog, BlogStatus};

use super::policies::{Action, Ownership, RbacPolicies, Resource};
use crate::actor::{Actor, Identity};

/// The row an action targets, reduced to what the gate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// The member the row belongs to.
    pub owner: MemberId,
    /// Moderation status, for moderated rows.
    pub moderation: Option<BlogStatus>,
}

impl Target {
    /// A row owned by `owner`.
    pub fn owned_by(owner: MemberId) -> Self {
        Self {
            owner,
            moderation: None,
        }
    }

    /// A blog, carrying its moderation status.
    pub fn blog(blog: &Blog) -> Self {
        Self {
            owner: blog.user_id,
            moderation: Some(blog.status),
        }
    }
}

/// Why the gate said no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// No one is signed in.
    AuthenticationRequired,
    /// The actor's role is below the minimum.
    InsufficientRole,
    /// The actor does not own the target and cannot bypass ownership.
    NotOwner,
    /// The target has been moderated and its owner can no longer edit it.
    ResourceLocked,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AuthenticationRequired => "authentication required",
            Self::InsufficientRole => "insufficient role",
            Self::NotOwner => "not owner",
            Self::ResourceLocked => "resource locked",
        })
    }
}

/// The gate's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Go ahead.
    Allow,
    /// Stop, with the reason.
    Deny(DenyReason),
}

impl Decision {
    /// Whether the decision allows the action.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether an actor may perform an action on a resource.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationGate {
    policies: RbacPolicies,
}

impl AuthorizationGate {
    /// Creates a gate with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gate with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns the policy table.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }

    /// Decide. Ownership and the moderation lock are checked against
    /// `target` when one is given; list and create calls pass `None`.
    pub fn authorize(
        &self,
        actor: &Actor,
        resource: Resource,
        action: Action,
        target: Option<&Target>,
    ) -> Decision {
        let Some(identity) = actor.identity() else {
            return Decision::Deny(DenyReason::AuthenticationRequired);
        };

        let Some(capability) = self.policies.capability(resource, action) else {
            return Decision::Deny(DenyReason::InsufficientRole);
        };

        if !identity.role.has_at_least(&capability.min_role) {
            return Decision::Deny(DenyReason::InsufficientRole);
        }

        let Some(target) = target else {
            return Decision::Allow;
        };
        let is_owner = target.owner == identity.member_id;

        if let Ownership::Required { bypass } = capability.ownership {
            if !is_owner && !identity.role.has_at_least(&bypass) {
                return Decision::Deny(DenyReason::NotOwner);
            }
        }

        if capability.moderation_lock
            && is_owner
            && target.moderation.is_some_and(|s| s.is_judged())
        {
            return Decision::Deny(DenyReason::ResourceLocked);
        }

        Decision::Allow
    }

    /// Like [`authorize`](Self::authorize), returning the identity on
    /// success and an `AppError` carrying the deny reason otherwise.
    pub fn require<'a>(
        &self,
        actor: &'a Actor,
        resource: Resource,
        action: Action,
        target: Option<&Target>,
    ) -> AppResult<&'a Identity> {
        match (self.authorize(actor, resource, action, target), actor.identity()) {
            (Decision::Allow, Some(identity)) => Ok(identity),
            (Decision::Deny(reason), _) => Err(deny_error(reason, actor, resource, action)),
            (Decision::Allow, None) => Err(deny_error(
                DenyReason::AuthenticationRequired,
                actor,
                resource,
                action,
            )),
        }
    }

    /// Rows of `resource` the actor may list. Actors below the ownership
    /// bypass role see only their own rows.
    pub fn list_scope(&self, actor: &Actor, resource: Resource) -> AppResult<ListScope> {
        let identity = self.require(actor, resource, Action::List, None)?;

        match self
            .policies
            .capability(resource, Action::List)
            .map(|c| c.ownership)
        {
            Some(Ownership::Required { bypass }) if !identity.role.has_at_least(&bypass) => {
                Ok(ListScope::OwnedBy(identity.member_id))
            }
            _ => Ok(ListScope::All),
        }
    }
}

fn deny_error(reason: DenyReason, actor: &Actor, resource: Resource, action: Action) -> AppError {
    match reason {
        DenyReason::AuthenticationRequired => {
            AppError::authentication_required("You must be signed in")
        }
        DenyReason::InsufficientRole => AppError::insufficient_role(match actor.role() {
            Some(role) => format!("Role '{role}' cannot {action} {resource}s"),
            None => format!("You cannot {action} {resource}s"),
        }),
        DenyReason::NotOwner => AppError::not_owner(format!("You can only {action} your own {resource}s")),
        DenyReason::ResourceLocked => AppError::resource_locked(format!(
            "This {resource} has been moderated and can no longer be edited"
        )),
    }
}
