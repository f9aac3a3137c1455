//! The caller of an operation.

use serde::{Deserialize, Serialize};

use clubhub_core::error::AppError;
use clubhub_core::types::{MemberId, SessionId};
use clubhub_entity::member::MemberRole;

/// A signed-in member acting through a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The acting member.
    pub member_id: MemberId,
    /// The session the request arrived on.
    pub session_id: SessionId,
    /// Current role, read from the store when the actor was resolved.
    pub role: MemberRole,
    /// Sign-in email.
    pub email: String,
}

/// Who is calling. Anonymity is a state of its own, never a role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// No valid session.
    #[default]
    Anonymous,
    /// A signed-in member.
    Member(Identity),
}

impl Actor {
    /// The identity, if signed in.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Member(identity) => Some(identity),
        }
    }

    /// Whether no one is signed in.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The acting member's id, if signed in.
    pub fn member_id(&self) -> Option<MemberId> {
        self.identity().map(|i| i.member_id)
    }

    /// The acting member's role, if signed in.
    pub fn role(&self) -> Option<MemberRole> {
        self.identity().map(|i| i.role)
    }

    /// The identity, or `AuthenticationRequired`.
    pub fn require_identity(&self) -> Result<&Identity, AppError> {
        self.identity()
            .ok_or_else(|| AppError::authentication_required("You must be signed in"))
    }
}
