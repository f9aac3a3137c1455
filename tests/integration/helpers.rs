//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use clubhub_api::{AppState, build_app};
use clubhub_auth::PasswordHasher;
use clubhub_core::config::AppConfig;
use clubhub_core::types::MemberId;
use clubhub_database::Stores;
use clubhub_entity::member::{CreateMember, CreateProfile, MemberRole};

/// Password given to every seeded member.
pub const PASSWORD: &str = "club-password-1";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory stores behind the router
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

/// A captured response.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body parsed as JSON, `Null` when empty
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(SET_COOKIE).and_then(|v| v.to_str().ok())
    }

    /// `data` of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `kind` of an error envelope.
    pub fn kind(&self) -> &str {
        self.body["kind"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores
    pub fn new() -> Self {
        let config = AppConfig::default();
        let stores = Stores::memory();
        let router = build_app(AppState::new(config.clone(), stores.clone()));

        Self {
            router,
            stores,
            config,
        }
    }

    /// Seed a member with a complete profile and return their id
    pub async fn create_member(&self, email: &str, role: MemberRole) -> MemberId {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        let (member, _) = self
            .stores
            .members
            .create(
                &CreateMember {
                    email: email.to_string(),
                    password_hash,
                    role,
                    invited_by: None,
                },
                &CreateProfile {
                    first_name: "Test".to_string(),
                    last_name: "Member".to_string(),
                },
            )
            .await
            .expect("Failed to create member");
        member.id
    }

    /// Seed a member and sign in; returns their id and session token
    pub async fn member(&self, email: &str, role: MemberRole) -> (MemberId, String) {
        let id = self.create_member(email, role).await;
        let token = self.sign_in(email, PASSWORD).await;
        (id, token)
    }

    /// Sign in and return the session token from the cookie
    pub async fn sign_in(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/sign-in",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-in failed: {:?}",
            response.body
        );

        let cookie = response.set_cookie().expect("No session cookie");
        cookie_value(cookie, &self.config.session.cookie_name)
            .expect("Session cookie has no value")
            .to_string()
    }

    /// Make an HTTP request, sending `token` as the session cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let cookie = token.map(|t| (COOKIE, format!("{}={t}", self.config.session.cookie_name)));
        self.send(method, path, body, cookie).await
    }

    /// Make an HTTP request, sending `token` as a bearer token
    pub async fn request_bearer(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: &str,
    ) -> TestResponse {
        self.send(method, path, body, Some((AUTHORIZATION, format!("Bearer {token}"))))
            .await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        credential: Option<(http::HeaderName, String)>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");
        if let Some((name, value)) = credential {
            req = req.header(name, value);
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Value of the cookie `name` in a `Set-Cookie` header.
pub fn cookie_value<'a>(set_cookie: &'a str, name: &str) -> Option<&'a str> {
    set_cookie
        .split(';')
        .next()?
        .trim()
        .strip_prefix(name)?
        .strip_prefix('=')
}
