//! Counts of what the caller can see, one section at a time.
//!
//! Sections load independently: a failing store call fills that section's
//! `error` and leaves the others intact.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use clubhub_auth::rbac::{AuthorizationGate, Resource};
use clubhub_core::error::AppError;
use clubhub_core::result::AppResult;
use clubhub_core::types::MemberId;
use clubhub_database::Stores;
use clubhub_entity::member::MemberRole;

use crate::context::RequestContext;

/// One dashboard section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Number of visible rows, when loading succeeded.
    pub count: Option<i64>,
    /// Why loading failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Section {
    fn from_result(name: &str, result: AppResult<i64>) -> Self {
        match result {
            Ok(count) => Self {
                count: Some(count),
                error: None,
            },
            Err(e) => {
                warn!(section = name, error = %e, "Dashboard section failed to load");
                Self {
                    count: None,
                    error: Some(e.message),
                }
            }
        }
    }
}

/// What `/dashboard` shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    /// The caller.
    pub member_id: MemberId,
    /// The caller's email.
    pub email: String,
    /// The caller's role.
    pub role: MemberRole,
    /// Members; only present for roles allowed to list members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Section>,
    /// Visible projects.
    pub projects: Section,
    /// Visible blogs.
    pub blogs: Section,
    /// All events.
    pub events: Section,
}

/// Builds the dashboard overview.
#[derive(Debug, Clone)]
pub struct DashboardService {
    stores: Stores,
    gate: Arc<AuthorizationGate>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(stores: Stores, gate: Arc<AuthorizationGate>) -> Self {
        Self { stores, gate }
    }

    /// Load the overview for a signed-in caller.
    pub async fn overview(&self, ctx: &RequestContext) -> Result<DashboardOverview, AppError> {
        let identity = ctx.identity()?;

        let members = match self.gate.list_scope(&ctx.actor, Resource::Member) {
            Ok(_) => Some(Section::from_result("members", self.stores.members.count().await)),
            Err(_) => None,
        };

        let projects = match self.gate.list_scope(&ctx.actor, Resource::Project) {
            Ok(scope) => self.stores.projects.count(scope).await,
            Err(e) => Err(e),
        };
        let blogs = match self.gate.list_scope(&ctx.actor, Resource::Blog) {
            Ok(scope) => self.stores.blogs.count(scope).await,
            Err(e) => Err(e),
        };
        let events = match self.gate.list_scope(&ctx.actor, Resource::Event) {
            Ok(_) => self.stores.events.count().await,
            Err(e) => Err(e),
        };

        Ok(DashboardOverview {
            member_id: identity.member_id,
            email: identity.email.clone(),
            role: identity.role,
            members,
            projects: Section::from_result("projects", projects),
            blogs: Section::from_result("blogs", blogs),
            events: Section::from_result("events", events),
        })
    }
}
