//! Request context carrying the resolved actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhub_auth::actor::{Actor, Identity};
use clubhub_core::error::AppError;
use clubhub_core::types::MemberId;
use clubhub_entity::member::MemberRole;

/// Context for the current request.
///
/// Built by the HTTP layer once the session token has been resolved and
/// passed into every service method, so each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller, anonymous or signed in.
    pub actor: Actor,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor: Actor, user_agent: Option<String>) -> Self {
        Self {
            actor,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// A context with no signed-in member.
    pub fn anonymous() -> Self {
        Self::new(Actor::Anonymous, None)
    }

    /// The acting member's id, if signed in.
    pub fn member_id(&self) -> Option<MemberId> {
        self.actor.member_id()
    }

    /// The acting member's role, if signed in.
    pub fn role(&self) -> Option<MemberRole> {
        self.actor.role()
    }

    /// The identity, or `AuthenticationRequired`.
    pub fn identity(&self) -> Result<&Identity, AppError> {
        self.actor.require_identity()
    }
}
