//! Claims embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubhub_core::types::{MemberId, SessionId};
use clubhub_entity::member::MemberRole;

/// Session token payload.
///
/// The role is informational only. Authorization always uses the role read
/// from the store when the actor is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the member id.
    pub sub: MemberId,
    /// Session this token belongs to.
    pub sid: SessionId,
    /// Role at sign-in.
    pub role: MemberRole,
    /// Email at sign-in.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
