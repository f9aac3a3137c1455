//! Integration tests for issuing and redeeming invitations.

mod helpers;

use chrono::{Duration, Utc};
use clubhub_auth::token::hash_token;
use clubhub_entity::invitation::CreateInvitation;
use clubhub_entity::member::MemberRole;
use http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

const NEW_PASSWORD: &str = "Violet-Harbor-Lantern-42";

fn redemption(token: &str) -> Value {
    json!({
        "token": token,
        "password": NEW_PASSWORD,
        "first_name": "Grace",
        "last_name": "Hopper",
    })
}

async fn invite(app: &TestApp, token: &str, email: &str, role: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/invitations",
            Some(json!({ "email": email, "role": role })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["invitation"]["state"], "pending");
    assert!(response.data()["invitation"].get("token_hash").is_none());
    response.data()["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn test_redeem_creates_member_with_invited_role() {
    let app = TestApp::new();
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;
    let token = invite(&app, &root, "Grace@Club.test", "admin").await;

    let response = app
        .request("GET", &format!("/invitations/redeem?token={token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "grace@club.test");

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption(&token)), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["member"]["role"], "admin");
    assert_eq!(response.data()["member"]["profile_completed"], true);
    assert_eq!(response.data()["profile"]["first_name"], "Grace");

    let session = app.sign_in("grace@club.test", NEW_PASSWORD).await;
    let response = app.request("GET", "/api/me", None, Some(&session)).await;
    assert_eq!(response.data()["member"]["role"], "admin");
}

#[tokio::test]
async fn test_second_redemption_fails() {
    let app = TestApp::new();
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;
    let token = invite(&app, &root, "grace@club.test", "member").await;

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption(&token)), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption(&token)), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.kind(), "TOKEN_ALREADY_USED");

    let members = app.stores.members.list().await.expect("list");
    assert_eq!(members.len(), 2);

    let response = app.request("GET", "/api/invitations", None, Some(&root)).await;
    assert_eq!(response.data()[0]["state"], "redeemed");
}

#[tokio::test]
async fn test_concurrent_redemptions_admit_one_member() {
    let app = TestApp::new();
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;
    let token = invite(&app, &root, "grace@club.test", "member").await;

    let (first, second) = tokio::join!(
        app.request("POST", "/invitations/redeem", Some(redemption(&token)), None),
        app.request("POST", "/invitations/redeem", Some(redemption(&token)), None),
    );

    let mut statuses = [first.status, second.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    let loser = if first.status == StatusCode::CONFLICT {
        &first
    } else {
        &second
    };
    assert_eq!(loser.kind(), "TOKEN_ALREADY_USED");

    let members = app.stores.members.list().await.expect("list");
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn test_expired_invitation_cannot_be_redeemed() {
    let app = TestApp::new();
    let root = app.create_member("root@club.test", MemberRole::SuperAdmin).await;

    let token = "expired-token";
    app.stores
        .invitations
        .create(&CreateInvitation {
            email: "late@club.test".to_string(),
            role: MemberRole::Member,
            invited_by: root,
            token_hash: hash_token(token),
            expires_at: Utc::now() - Duration::hours(1),
        })
        .await
        .expect("invitation");

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption(token)), None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.kind(), "TOKEN_EXPIRED");
    assert!(
        app.stores
            .members
            .find_by_email("late@club.test")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn test_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption("nope")), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_weak_password_leaves_invitation_redeemable() {
    let app = TestApp::new();
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;
    let token = invite(&app, &root, "grace@club.test", "member").await;

    let mut weak = redemption(&token);
    weak["password"] = json!("password");
    let response = app
        .request("POST", "/invitations/redeem", Some(weak), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption(&token)), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_only_super_admins_manage_invitations() {
    let app = TestApp::new();
    let (_, admin) = app.member("admin@club.test", MemberRole::Admin).await;

    let response = app
        .request(
            "POST",
            "/api/invitations",
            Some(json!({ "email": "x@club.test" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.kind(), "INSUFFICIENT_ROLE");

    let response = app.request("GET", "/api/invitations", None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invitation_rules() {
    let app = TestApp::new();
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;

    let response = app
        .request(
            "POST",
            "/api/invitations",
            Some(json!({ "email": "boss@club.test", "role": "super_admin" })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/invitations",
            Some(json!({ "email": "ROOT@club.test" })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "POST",
            "/api/invitations",
            Some(json!({ "email": "not-an-email" })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_invitation_is_gone() {
    let app = TestApp::new();
    let (_, root) = app.member("root@club.test", MemberRole::SuperAdmin).await;
    let token = invite(&app, &root, "grace@club.test", "member").await;

    let response = app.request("GET", "/api/invitations", None, Some(&root)).await;
    let id = response.data()[0]["id"].as_str().expect("id").to_string();

    let response = app
        .request("DELETE", &format!("/api/invitations/{id}"), None, Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/invitations/redeem", Some(redemption(&token)), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
