//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhub_entity::invitation::{Invitation, InvitationState};
use clubhub_entity::member::{Member, Profile};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sign-in response. The token itself travels in the cookie only.
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    /// The signed-in member.
    pub member: Member,
    /// When the session ends.
    pub expires_at: DateTime<Utc>,
}

/// Member together with profile.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    /// Account.
    pub member: Member,
    /// Profile.
    pub profile: Option<Profile>,
}

/// Invitation as shown to super admins.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    /// Stored invitation.
    #[serde(flatten)]
    pub invitation: Invitation,
    /// Lifecycle state at the time of the request.
    pub state: InvitationState,
}

impl InvitationResponse {
    /// Evaluate the invitation's state at `now`.
    pub fn at(invitation: Invitation, now: DateTime<Utc>) -> Self {
        let state = invitation.state_at(now);
        Self { invitation, state }
    }
}

/// A newly issued invitation with its one-time token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedInvitationResponse {
    /// Stored invitation.
    pub invitation: InvitationResponse,
    /// Token to hand to the invitee. Shown once.
    pub token: String,
}

/// Public landing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingResponse {
    /// Application name.
    pub name: String,
    /// Where to sign in.
    pub sign_in: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Version.
    pub version: String,
}
