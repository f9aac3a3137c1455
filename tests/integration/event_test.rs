//! Integration tests for events.

mod helpers;

use chrono::{Duration, Utc};
use clubhub_entity::member::MemberRole;
use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

async fn schedule(app: &TestApp, token: &str, title: &str, days_from_now: i64) -> StatusCode {
    app.request(
        "POST",
        "/api/events",
        Some(json!({
            "title": title,
            "description": "Club night",
            "date": (Utc::now() + Duration::days(days_from_now)).to_rfc3339(),
            "location": "Room 4",
        })),
        Some(token),
    )
    .await
    .status
}

#[tokio::test]
async fn test_only_admins_create_events() {
    let app = TestApp::new();
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    assert_eq!(schedule(&app, &ada, "Hack night", 3).await, StatusCode::FORBIDDEN);
    assert_eq!(schedule(&app, &admin, "Hack night", 3).await, StatusCode::CREATED);

    let response = app.request("GET", "/api/events", None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_upcoming_and_past_split_at_now() {
    let app = TestApp::new();
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    schedule(&app, &admin, "Later", 10).await;
    schedule(&app, &admin, "Soon", 1).await;
    schedule(&app, &admin, "Last month", -30).await;
    schedule(&app, &admin, "Last week", -7).await;

    let response = app
        .request("GET", "/api/events?when=upcoming", None, Some(&admin))
        .await;
    let titles: Vec<&str> = response
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert_eq!(titles, ["Soon", "Later"]);

    let response = app
        .request("GET", "/api/events?when=past", None, Some(&admin))
        .await;
    let titles: Vec<&str> = response
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert_eq!(titles, ["Last week", "Last month"]);

    let response = app.request("GET", "/api/events", None, Some(&admin)).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_admin_edits_any_event() {
    let app = TestApp::new();
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;
    let (_, other) = app.member("other@club.test", MemberRole::Admin).await;
    let (_, ada) = app.member("ada@club.test", MemberRole::Member).await;

    schedule(&app, &admin, "Hack night", 3).await;
    let response = app.request("GET", "/api/events", None, Some(&admin)).await;
    let path = format!("/api/events/{}", response.data()[0]["id"].as_str().expect("id"));

    let response = app
        .request("PUT", &path, Some(json!({ "location": "Hall" })), Some(&ada))
        .await;
    assert_eq!(response.kind(), "NOT_OWNER");

    let response = app
        .request("PUT", &path, Some(json!({ "location": "Hall" })), Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["location"], "Hall");
    assert_eq!(response.data()["title"], "Hack night");

    let response = app.request("DELETE", &path, None, Some(&other)).await;
    assert_eq!(response.status, StatusCode::OK);
}
