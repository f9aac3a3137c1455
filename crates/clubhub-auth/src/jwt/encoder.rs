//! Session token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use clubhub_core::config::auth::AuthConfig;
use clubhub_core::error::AppError;
use clubhub_entity::member::Member;
use clubhub_entity::session::Session;

use super::claims::Claims;

/// Creates signed (HS256) session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Issue a token naming `session`, valid until the session expires.
    pub fn encode_session(&self, member: &Member, session: &Session) -> Result<String, AppError> {
        self.encode_until(member, session, Utc::now(), session.expires_at)
    }

    pub(crate) fn encode_until(
        &self,
        member: &Member,
        session: &Session,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: member.id,
            sid: session.id,
            role: member.role,
            email: member.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
