//! Route definitions for the ClubHub HTTP API.
//!
//! Page-level routes (`/`, `/dashboard`, sign-in, sign-out, redemption)
//! sit at the root; resource endpoints are mounted under `/api`.

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, without middleware or state.
pub fn build_router() -> Router<AppState> {
    let api_routes = Router::new()
        .merge(me_routes())
        .merge(project_routes())
        .merge(blog_routes())
        .merge(event_routes())
        .merge(invitation_routes())
        .merge(member_routes());

    Router::new()
        .merge(page_routes())
        .nest("/api", api_routes)
}

/// Landing, dashboard, sign-in/out, redemption and liveness.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::landing))
        .route("/health", get(handlers::health::health))
        .route("/dashboard", get(handlers::dashboard::overview))
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route(
            "/logout",
            get(handlers::auth::logout).post(handlers::auth::logout),
        )
        .route(
            "/invitations/redeem",
            get(handlers::invitation::check_invitation)
                .post(handlers::invitation::redeem_invitation),
        )
}

/// The caller's own account.
fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::member::me))
        .route("/me/profile", put(handlers::member::update_my_profile))
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(handlers::project::list_projects).post(handlers::project::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::project::get_project)
                .put(handlers::project::update_project)
                .delete(handlers::project::delete_project),
        )
}

/// Blogs and the moderation queue.
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs",
            get(handlers::blog::list_blogs).post(handlers::blog::create_blog),
        )
        .route("/blogs/pending", get(handlers::blog::pending_blogs))
        .route(
            "/blogs/{id}",
            get(handlers::blog::get_blog)
                .put(handlers::blog::update_blog)
                .delete(handlers::blog::delete_blog),
        )
        .route("/blogs/{id}/moderate", post(handlers::blog::moderate_blog))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route(
            "/events/{id}",
            get(handlers::event::get_event)
                .put(handlers::event::update_event)
                .delete(handlers::event::delete_event),
        )
}

/// Super-admin invitation management.
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invitations",
            get(handlers::invitation::list_invitations)
                .post(handlers::invitation::create_invitation),
        )
        .route(
            "/invitations/{id}",
            delete(handlers::invitation::delete_invitation),
        )
}

/// Member administration.
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(handlers::member::list_members))
        .route(
            "/members/{id}",
            get(handlers::member::get_member).delete(handlers::member::delete_member),
        )
        .route("/members/{id}/role", put(handlers::member::change_role))
}
