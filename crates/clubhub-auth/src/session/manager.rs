//! Session lifecycle: sign-in, sign-out and actor resolution.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use clubhub_core::config::auth::AuthConfig;
use clubhub_core::config::session::SessionConfig;
use clubhub_core::error::AppError;
use clubhub_database::store::{MemberStore, SessionStore};
use clubhub_entity::member::Member;
use clubhub_entity::session::{CreateSession, Session};

use crate::actor::{Actor, Identity};
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignIn {
    /// Signed token to put in the session cookie.
    pub token: String,
    /// The created session.
    pub session: Session,
    /// The signed-in member.
    pub member: Member,
    /// When the token and session expire.
    pub expires_at: DateTime<Utc>,
}

/// Creates, revokes and resolves sessions.
#[derive(Clone)]
pub struct SessionManager {
    members: Arc<dyn MemberStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager over the given stores.
    pub fn new(
        members: Arc<dyn MemberStore>,
        sessions: Arc<dyn SessionStore>,
        auth: &AuthConfig,
        session: &SessionConfig,
    ) -> Self {
        Self {
            members,
            sessions,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(auth),
            decoder: JwtDecoder::new(auth),
            ttl: Duration::days(session.ttl_days),
        }
    }

    /// Verify credentials, open a session and issue its token.
    ///
    /// Unknown email, wrong password and inactive accounts all fail with the
    /// same `InvalidCredentials` message.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        user_agent: Option<&str>,
    ) -> Result<SignIn, AppError> {
        let email = email.trim().to_lowercase();

        let Some(member) = self.members.find_by_email(&email).await? else {
            debug!(email = %email, "Sign-in for unknown email");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &member.password_hash)? {
            warn!(member_id = %member.id, "Sign-in with wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        if !member.can_sign_in() {
            warn!(member_id = %member.id, status = %member.status.as_str(), "Sign-in for inactive member");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let expires_at = Utc::now() + self.ttl;
        let session = self
            .sessions
            .create(&CreateSession {
                member_id: member.id,
                user_agent: user_agent.map(str::to_string),
                expires_at,
            })
            .await?;

        let token = self.encoder.encode_session(&member, &session)?;

        info!(member_id = %member.id, session_id = %session.id, "Member signed in");

        Ok(SignIn {
            token,
            expires_at: session.expires_at,
            session,
            member,
        })
    }

    /// Revoke the session named by `token`. Never fails: an unreadable token
    /// or a store error is logged and ignored.
    pub async fn sign_out(&self, token: &str) {
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Sign-out with unreadable token");
                return;
            }
        };

        match self.sessions.revoke(claims.sid).await {
            Ok(()) => info!(member_id = %claims.sub, session_id = %claims.sid, "Member signed out"),
            Err(e) => warn!(session_id = %claims.sid, error = %e, "Failed to revoke session"),
        }
    }

    /// Turn an optional token into an actor.
    ///
    /// Missing, forged, expired or revoked tokens, and tokens of deleted or
    /// inactive members, all resolve to [`Actor::Anonymous`]. The role is
    /// read from the store, not from the token.
    pub async fn resolve_actor(&self, token: Option<&str>) -> Actor {
        let Some(token) = token else {
            return Actor::Anonymous;
        };

        match self.resolve_identity(token).await {
            Ok(Some(identity)) => Actor::Member(identity),
            Ok(None) => Actor::Anonymous,
            Err(e) => {
                debug!(error = %e, "Session token did not resolve");
                Actor::Anonymous
            }
        }
    }

    async fn resolve_identity(&self, token: &str) -> Result<Option<Identity>, AppError> {
        let claims = self.decoder.decode(token)?;
        let now = Utc::now();

        let Some(session) = self.sessions.find_by_id(claims.sid).await? else {
            return Ok(None);
        };
        if !session.is_active_at(now) || session.member_id != claims.sub {
            return Ok(None);
        }

        let Some(member) = self.members.find_by_id(session.member_id).await? else {
            return Ok(None);
        };
        if !member.can_sign_in() {
            return Ok(None);
        }

        Ok(Some(Identity {
            member_id: member.id,
            session_id: session.id,
            role: member.role,
            email: member.email,
        }))
    }
}
