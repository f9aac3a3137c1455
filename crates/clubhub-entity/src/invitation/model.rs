//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clubhub_core::types::{InvitationId, MemberId};

use crate::member::{CreateMember, CreateProfile, MemberRole};

/// A single-use invitation to join the club.
///
/// Only the SHA-256 hash of the token is stored; the plain token is shown
/// once, at creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: InvitationId,
    /// Invited email address.
    pub email: String,
    /// Role the new member receives.
    pub role: MemberRole,
    /// Issuing super admin.
    pub invited_by: MemberId,
    /// Hex SHA-256 of the token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// After this instant the invitation can no longer be redeemed.
    pub expires_at: DateTime<Utc>,
    /// Set once redeemed.
    pub used: bool,
    /// When it was redeemed.
    pub used_at: Option<DateTime<Utc>>,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state, derived from the stored row at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationState {
    /// Redeemable.
    Pending,
    /// Redeemed; terminal.
    Redeemed,
    /// Past `expires_at` without being redeemed; terminal.
    Expired,
}

impl Invitation {
    /// State of the invitation at `now`. A used invitation is redeemed even
    /// if it has since expired.
    pub fn state_at(&self, now: DateTime<Utc>) -> InvitationState {
        if self.used {
            InvitationState::Redeemed
        } else if self.expires_at <= now {
            InvitationState::Expired
        } else {
            InvitationState::Pending
        }
    }
}

/// Data required to create an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitation {
    /// Invited email address.
    pub email: String,
    /// Role the new member receives.
    pub role: MemberRole,
    /// Issuing super admin.
    pub invited_by: MemberId,
    /// Hex SHA-256 of the token.
    pub token_hash: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Everything the store needs to redeem an invitation atomically.
#[derive(Debug, Clone)]
pub struct Redemption {
    /// The invitation being consumed.
    pub invitation_id: InvitationId,
    /// The member row to insert.
    pub member: CreateMember,
    /// The profile row to insert.
    pub profile: CreateProfile,
}
