//! Redirects between the public landing page and the protected area.
//!
//! Only the presence of a session token is inspected here. Whether the
//! token is still valid is decided later by the `CurrentActor` extractor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use crate::extractors::session_token;
use crate::state::AppState;

/// Applies the session gate before routing.
pub async fn session_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let has_token = session_token(request.headers(), state.cookie_name()).is_some();
    let decision = state.session_gate.decide(request.uri().path(), has_token);

    match state.session_gate.location(decision) {
        Some(location) => {
            debug!(path = %request.uri().path(), location, "Session gate redirect");
            Redirect::temporary(location).into_response()
        }
        None => next.run(request).await,
    }
}
