//! # clubhub-api
//!
//! HTTP API layer for ClubHub built on Axum.
//!
//! Provides every endpoint, the session gate middleware, the actor
//! extractor, request validation, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
