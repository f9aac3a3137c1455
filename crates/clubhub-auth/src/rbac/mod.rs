//! Role-based access control with ownership and moderation rules.

pub mod enforcer;
pub mod policies;

pub use enforcer::{AuthorizationGate, Decision, DenyReason, Target};
pub use policies::{Action, Capability, Ownership, RbacPolicies, Resource};
