//! # clubhub-service
//!
//! Use-case services for ClubHub. Each service asks the authorization
//! gate first and only then touches its store, so a denied operation never
//! mutates anything.
//!
//! Services follow constructor injection: stores and the gate are handed
//! over at construction time as `Arc` references.

pub mod blog;
pub mod context;
pub mod dashboard;
pub mod event;
pub mod invitation;
pub mod member;
pub mod project;

#[cfg(test)]
pub(crate) mod testing;

pub use blog::{BlogService, ModerationService};
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use event::EventService;
pub use invitation::InvitationService;
pub use member::{AdminMemberService, MemberService};
pub use project::ProjectService;

use clubhub_core::error::AppError;

/// Trim a required text field, rejecting blank values.
pub(crate) fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank values to `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
