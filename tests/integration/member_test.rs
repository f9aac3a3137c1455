//! Integration tests for profiles, member administration and the dashboard.

mod helpers;

use clubhub_entity::member::MemberRole;
use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_me_and_profile_update() {
    let app = TestApp::new();
    let (id, token) = app.member("ada@club.test", MemberRole::Member).await;

    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["member"]["id"], id.to_string());
    assert_eq!(response.data()["profile"]["first_name"], "Test");

    let response = app
        .request(
            "PUT",
            "/api/me/profile",
            Some(json!({ "first_name": "Ada", "bio": "Counts things." })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["first_name"], "Ada");
    assert_eq!(response.data()["last_name"], "Member");
    assert_eq!(response.data()["bio"], "Counts things.");
}

#[tokio::test]
async fn test_profile_update_rejects_bad_avatar() {
    let app = TestApp::new();
    let (_, token) = app.member("ada@club.test", MemberRole::Member).await;

    let response = app
        .request(
            "PUT",
            "/api/me/profile",
            Some(json!({ "avatar_url": "not a url" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_members_read_only_themselves() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let bob = app.create_member("bob@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    let path = format!("/api/members/{bob}");

    let response = app.request("GET", &path, None, Some(&ada)).await;
    assert_eq!(response.kind(), "NOT_OWNER");

    let response = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(response.kind(), "NOT_OWNER");

    let response = app.request("GET", &path, None, Some(&root)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["member"]["email"], "bob@club.test");
}

#[tokio::test]
async fn test_member_listing_is_super_admin_only() {
    let app = TestApp::new();
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    let response = app.request("GET", "/api/members", None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.kind(), "INSUFFICIENT_ROLE");

    let response = app.request("GET", "/api/members", None, Some(&root)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_role_change_takes_effect_on_next_request() {
    let app = TestApp::new();
    let (ada_id, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    let response = app.request("GET", "/api/blogs/pending", None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/members/{ada_id}/role"),
            Some(json!({ "role": "admin" })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["role"], "admin");

    // Same session, fresh role.
    let response = app.request("GET", "/api/blogs/pending", None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_super_admin_cannot_demote_or_delete_self() {
    let app = TestApp::new();
    let (root_id, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/members/{root_id}/role"),
            Some(json!({ "role": "member" })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("DELETE", &format!("/api/members/{root_id}"), None, Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_member_loses_session() {
    let app = TestApp::new();
    let (ada_id, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    let response = app
        .request("DELETE", &format!("/api/members/{ada_id}"), None, Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/me", None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_sections_follow_role() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    app.request(
        "POST",
        "/api/projects",
        Some(json!({ "title": "Robot", "description": "Beeps" })),
        Some(&root),
    )
    .await;

    let response = app.request("GET", "/dashboard", None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data().get("members").is_none());
    assert_eq!(response.data()["projects"]["count"], 0);

    let response = app.request("GET", "/dashboard", None, Some(&root)).await;
    assert_eq!(response.data()["members"]["count"], 2);
    assert_eq!(response.data()["projects"]["count"], 1);
    assert_eq!(response.data()["role"], "super_admin");
}
