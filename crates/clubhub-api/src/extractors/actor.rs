//! `CurrentActor` extractor: resolves the session token into a request context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use clubhub_service::context::RequestContext;

use crate::state::AppState;

/// The resolved caller. Never rejects: a missing or unusable token yields
/// an anonymous context, and the service decides whether that is enough.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub RequestContext);

impl std::ops::Deref for CurrentActor {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The session token of a request: the session cookie, or failing that an
/// `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = CookieJar::from_headers(headers).get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, state.cookie_name());
        let actor = state.session_manager.resolve_actor(token.as_deref()).await;

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(CurrentActor(RequestContext::new(actor, user_agent)))
    }
}
