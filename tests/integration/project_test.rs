//! Integration tests for project ownership and list narrowing.

mod helpers;

use clubhub_entity::member::MemberRole;
use http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

async fn create_project(app: &TestApp, token: &str, title: &str) -> Value {
    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({
                "title": title,
                "description": "Built at the club",
                "github_url": "https://github.com/club/demo",
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data().clone()
}

#[tokio::test]
async fn test_member_lists_only_own_projects() {
    let app = TestApp::new();
    let (ada, ada_token) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, bob_token) = app.member("bob@club.test", MemberRole::Member).await;
    let (_, admin_token) = app.member("admin@club.test", MemberRole::Admin).await;

    create_project(&app, &ada_token, "Ada's robot").await;
    create_project(&app, &bob_token, "Bob's site").await;

    let response = app.request("GET", "/api/projects", None, Some(&ada_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let projects = response.data().as_array().expect("array");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["user_id"], ada.to_string());

    let response = app
        .request("GET", "/api/projects", None, Some(&admin_token))
        .await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(2));

    let response = app
        .request("GET", "/api/projects?mine=true", None, Some(&admin_token))
        .await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_new_project_is_owned_by_creator() {
    let app = TestApp::new();
    let (ada, token) = app.member("ada@club.test", MemberRole::Member).await;

    let project = create_project(&app, &token, "Robot").await;
    assert_eq!(project["user_id"], ada.to_string());
    assert_eq!(project["status"], "in_progress");
}

#[tokio::test]
async fn test_member_cannot_edit_or_delete_others_project() {
    let app = TestApp::new();
    let (_, ada_token) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, bob_token) = app.member("bob@club.test", MemberRole::Member).await;

    let project = create_project(&app, &ada_token, "Robot").await;
    let path = format!("/api/projects/{}", project["id"].as_str().expect("id"));

    let response = app
        .request("PUT", &path, Some(json!({ "title": "Mine now" })), Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.kind(), "NOT_OWNER");

    let response = app.request("DELETE", &path, None, Some(&bob_token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.kind(), "NOT_OWNER");

    let response = app.request("GET", &path, None, Some(&ada_token)).await;
    assert_eq!(response.data()["title"], "Robot");
}

#[tokio::test]
async fn test_owner_edits_and_admin_deletes() {
    let app = TestApp::new();
    let (_, ada_token) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin_token) = app.member("admin@club.test", MemberRole::Admin).await;

    let project = create_project(&app, &ada_token, "Robot").await;
    let path = format!("/api/projects/{}", project["id"].as_str().expect("id"));

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "status": "completed", "live_url": "https://robot.club.test" })),
            Some(&ada_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "completed");
    assert_eq!(response.data()["title"], "Robot");

    let response = app.request("DELETE", &path, None, Some(&admin_token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &path, None, Some(&ada_token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_cannot_create() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "title": "x", "description": "y" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let app = TestApp::new();
    let (_, token) = app.member("ada@club.test", MemberRole::Member).await;

    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "title": "", "description": "y", "github_url": "not a url" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.kind(), "VALIDATION");

    let response = app
        .request("GET", "/api/projects/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
