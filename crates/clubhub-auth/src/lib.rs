//! # clubhub-auth
//!
//! Authentication and authorization for ClubHub.
//!
//! ## Modules
//!
//! - `actor` — the caller of an operation, anonymous or a signed-in member
//! - `jwt` — signed session tokens carried by the session cookie
//! - `password` — Argon2id password hashing and policy enforcement
//! - `rbac` — the authorization gate: role hierarchy, ownership, moderation lock
//! - `session` — the request-level session gate and the sign-in lifecycle
//! - `token` — single-use invitation tokens

pub mod actor;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;
pub mod token;

pub use actor::{Actor, Identity};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Action, AuthorizationGate, Decision, DenyReason, RbacPolicies, Resource, Target};
pub use session::{GateDecision, SessionGate, SessionManager, SignIn};
