//! Liveness and landing handlers.

use axum::Json;

use crate::dto::response::{ApiResponse, HealthResponse, LandingResponse};

/// GET /
///
/// Signed-in callers never get here; the session gate sends them on to
/// the dashboard.
pub async fn landing() -> Json<ApiResponse<LandingResponse>> {
    Json(ApiResponse::ok(LandingResponse {
        name: "ClubHub".to_string(),
        sign_in: "/auth/sign-in".to_string(),
    }))
}

/// GET /health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
