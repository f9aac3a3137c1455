//! Integration tests for sign-in, sign-out and the session gate.

mod helpers;

use clubhub_entity::member::MemberRole;
use http::StatusCode;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_sign_in_sets_session_cookie() {
    let app = TestApp::new();
    app.create_member("ada@club.test", MemberRole::Member).await;

    let response = app
        .request(
            "POST",
            "/auth/sign-in",
            Some(serde_json::json!({ "email": "Ada@Club.test ", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["member"]["email"], "ada@club.test");
    assert!(response.data()["member"].get("password_hash").is_none());

    let cookie = response.set_cookie().expect("cookie");
    assert!(cookie.starts_with("club-session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = TestApp::new();
    app.create_member("ada@club.test", MemberRole::Member).await;

    let response = app
        .request(
            "POST",
            "/auth/sign-in",
            Some(serde_json::json!({ "email": "ada@club.test", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Invalid email or password");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_sign_in_unknown_email_looks_like_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/sign-in",
            Some(serde_json::json!({ "email": "ghost@club.test", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_sign_in_requires_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/sign-in",
            Some(serde_json::json!({ "email": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.kind(), "VALIDATION");
}

#[tokio::test]
async fn test_gate_redirects_signed_in_landing_to_dashboard() {
    let app = TestApp::new();
    let (_, token) = app.member("ada@club.test", MemberRole::Member).await;

    let response = app.request("GET", "/", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/dashboard"));

    let response = app.request("GET", "/dashboard", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "ada@club.test");
}

#[tokio::test]
async fn test_gate_redirects_anonymous_dashboard_to_landing() {
    let app = TestApp::new();

    let response = app.request("GET", "/dashboard", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));

    let response = app.request("GET", "/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["sign_in"], "/auth/sign-in");
}

#[tokio::test]
async fn test_gate_is_a_prefix_match_only() {
    let app = TestApp::new();

    // Anything under the prefix is redirected, even paths with no route.
    let response = app.request("GET", "/dashboardx", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);

    // API routes are not gated; the resource gate answers instead.
    let response = app.request("GET", "/api/projects", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.kind(), "AUTHENTICATION_REQUIRED");
}

#[tokio::test]
async fn test_forged_cookie_passes_gate_but_resolves_anonymous() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/dashboard", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/api/me", None, Some("not-a-real-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie_and_revokes_session() {
    let app = TestApp::new();
    let (_, token) = app.member("ada@club.test", MemberRole::Member).await;

    let response = app.request("POST", "/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
    let cookie = response.set_cookie().expect("removal cookie");
    assert!(cookie.starts_with("club-session="));
    assert!(cookie.contains("Max-Age=0"));

    // The browser dropped the cookie: the gate sends it back to the landing page.
    let response = app.request("GET", "/dashboard", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));

    // A copy of the old token no longer resolves.
    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let app = TestApp::new();

    let response = app.request("GET", "/logout", None, None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = TestApp::new();
    let (id, token) = app.member("ada@club.test", MemberRole::Member).await;

    let response = app.request_bearer("GET", "/api/me", None, &token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["member"]["id"], id.to_string());
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}
