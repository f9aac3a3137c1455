//! Integration tests for blog moderation and the moderation lock.

mod helpers;

use clubhub_entity::member::MemberRole;
use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

/// Create a blog as `token` and return its path.
async fn write_blog(app: &TestApp, token: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/blogs",
            Some(json!({ "title": "Meetup recap", "content": "It went well." })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["status"], "pending");
    format!("/api/blogs/{}", response.data()["id"].as_str().expect("id"))
}

async fn moderate(app: &TestApp, path: &str, verdict: &str, token: &str) -> helpers::TestResponse {
    app.request(
        "POST",
        &format!("{path}/moderate"),
        Some(json!({ "status": verdict })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_owner_cannot_edit_judged_blog() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    let path = write_blog(&app, &ada).await;
    let response = moderate(&app, &path, "approved", &admin).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "approved");

    let response = app
        .request("PUT", &path, Some(json!({ "title": "Edited" })), Some(&ada))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.kind(), "RESOURCE_LOCKED");

    let response = app.request("GET", &path, None, Some(&ada)).await;
    assert_eq!(response.data()["title"], "Meetup recap");
    assert_eq!(response.data()["status"], "approved");
}

#[tokio::test]
async fn test_rejected_blog_is_locked_too() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    let path = write_blog(&app, &ada).await;
    moderate(&app, &path, "rejected", &admin).await;

    let response = app
        .request("PUT", &path, Some(json!({ "content": "Try again" })), Some(&ada))
        .await;
    assert_eq!(response.kind(), "RESOURCE_LOCKED");
}

#[tokio::test]
async fn test_owner_edit_of_pending_blog_stays_pending() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;

    let path = write_blog(&app, &ada).await;
    let response = app
        .request("PUT", &path, Some(json!({ "content": "Longer recap." })), Some(&ada))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["content"], "Longer recap.");
    assert_eq!(response.data()["status"], "pending");
}

#[tokio::test]
async fn test_admin_edit_of_approved_blog_resets_to_pending() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    let path = write_blog(&app, &ada).await;
    moderate(&app, &path, "approved", &admin).await;

    let response = app
        .request("PUT", &path, Some(json!({ "title": "Fixed typo" })), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], "Fixed typo");
    assert_eq!(response.data()["status"], "pending");
}

#[tokio::test]
async fn test_members_cannot_moderate() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;

    let path = write_blog(&app, &ada).await;
    let response = moderate(&app, &path, "approved", &ada).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.kind(), "INSUFFICIENT_ROLE");

    let response = app.request("GET", "/api/blogs/pending", None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_moderation_rejects_unknown_verdict() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    let path = write_blog(&app, &ada).await;
    let response = moderate(&app, &path, "pending", &admin).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_queue_and_status_filter() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    let first = write_blog(&app, &ada).await;
    write_blog(&app, &ada).await;
    moderate(&app, &first, "approved", &admin).await;

    let response = app
        .request("GET", "/api/blogs/pending", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));

    let response = app
        .request("GET", "/api/blogs?status=approved", None, Some(&ada))
        .await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));

    let response = app.request("GET", "/api/blogs", None, Some(&admin)).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_member_cannot_delete_others_blog() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, bob) = app.member("bob@club.test", MemberRole::Member).await;

    let path = write_blog(&app, &ada).await;
    let response = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(response.kind(), "NOT_OWNER");

    let response = app.request("DELETE", &path, None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::OK);
}
