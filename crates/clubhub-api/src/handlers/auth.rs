//! Sign-in and sign-out handlers.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::headers::UserAgent;

use crate::dto::request::SignInRequest;
use crate::dto::response::{ApiResponse, SignInResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, session_token};
use crate::state::AppState;

/// POST /auth/sign-in
///
/// On success the session token is set as an `HttpOnly` cookie that lives
/// as long as the session.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SignInResponse>>), ApiError> {
    let user_agent = user_agent.map(|TypedHeader(ua)| ua.as_str().to_string());
    let result = state
        .session_manager
        .sign_in(&req.email, &req.password, user_agent.as_deref())
        .await?;

    let session = &state.config.session;
    let cookie = Cookie::build((state.cookie_name().to_string(), result.token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Strict)
        .secure(session.secure_cookie)
        .max_age(time::Duration::seconds(session.ttl_seconds()));

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(SignInResponse {
            member: result.member,
            expires_at: result.expires_at,
        })),
    ))
}

/// GET|POST /logout
///
/// Always succeeds: the session is revoked if it can be, the cookie is
/// cleared and the caller is sent back to the public root.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(token) = session_token(&headers, state.cookie_name()) {
        state.session_manager.sign_out(&token).await;
    }

    let removal = Cookie::build(state.cookie_name().to_string()).path("/");
    (
        jar.remove(removal),
        Redirect::to(&state.config.gate.public_root),
    )
}
