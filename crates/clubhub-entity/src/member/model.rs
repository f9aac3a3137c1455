//! Member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clubhub_core::types::MemberId;

use super::role::MemberRole;
use super::status::MemberStatus;

/// A club member. This is the identity every session acts as.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique member identifier.
    pub id: MemberId,
    /// Sign-in email, stored lowercased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Position in the role hierarchy.
    pub role: MemberRole,
    /// Account status.
    pub status: MemberStatus,
    /// Set once the member has filled in their profile.
    pub profile_completed: bool,
    /// The super admin whose invitation created this account.
    pub invited_by: Option<MemberId>,
    /// When the member was created.
    pub created_at: DateTime<Utc>,
    /// When the member was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Check if the member can sign in right now.
    pub fn can_sign_in(&self) -> bool {
        self.status.can_sign_in()
    }
}

/// Data required to create a new member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMember {
    /// Sign-in email; lowercased by the store.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: MemberRole,
    /// Inviting member, if any.
    pub invited_by: Option<MemberId>,
}
