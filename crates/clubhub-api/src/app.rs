//! Application builder: wires router, middleware and state into an Axum app.

use std::future::Future;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use clubhub_core::config::AppConfig;
use clubhub_core::error::AppError;
use clubhub_database::Stores;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::session_gate::session_gate;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
///
/// The session gate runs innermost so that logging and tracing still see
/// its redirects.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router()
        .layer(from_fn_with_state(state.clone(), session_gate))
        .layer(from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the HTTP server until `shutdown` resolves.
pub async fn serve<F>(config: AppConfig, stores: Stores, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server.bind_address();
    let app = build_app(AppState::new(config, stores));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "ClubHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("ClubHub server stopped");
    Ok(())
}
