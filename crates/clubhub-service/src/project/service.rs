//! Project CRUD with ownership checks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use clubhub_auth::rbac::{Action, AuthorizationGate, Resource, Target};
use clubhub_core::error::AppError;
use clubhub_core::types::{ListScope, ProjectId};
use clubhub_database::store::ProjectStore;
use clubhub_entity::project::{CreateProject, Project, ProjectStatus, UpdateProject};

use crate::context::RequestContext;
use crate::{optional, required};

/// Fields supplied by the caller when creating a project. The owner is
/// always the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProject {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Source repository link.
    pub github_url: Option<String>,
    /// Deployed site link.
    pub live_url: Option<String>,
    /// Initial status, `in_progress` when omitted.
    pub status: Option<ProjectStatus>,
}

/// Project operations.
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectStore>,
    gate: Arc<AuthorizationGate>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(projects: Arc<dyn ProjectStore>, gate: Arc<AuthorizationGate>) -> Self {
        Self { projects, gate }
    }

    /// Create a project owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, req: NewProject) -> Result<Project, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Project, Action::Create, None)?;

        let data = CreateProject {
            user_id: identity.member_id,
            title: required("Title", &req.title)?,
            description: required("Description", &req.description)?,
            github_url: optional(req.github_url.as_deref()),
            live_url: optional(req.live_url.as_deref()),
            status: req.status.unwrap_or_default(),
        };

        let project = self.projects.create(&data).await?;
        info!(project_id = %project.id, owner = %project.user_id, "Project created");
        Ok(project)
    }

    /// Projects visible to the caller: their own, or all from admin up.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        let scope = self.gate.list_scope(&ctx.actor, Resource::Project)?;
        self.projects.list(scope).await
    }

    /// The caller's own projects, whatever their role.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Project, Action::List, None)?;
        self.projects
            .list(ListScope::OwnedBy(identity.member_id))
            .await
    }

    /// Read one project.
    pub async fn get(&self, ctx: &RequestContext, id: ProjectId) -> Result<Project, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Project, Action::Read, None)?;
        self.find(id).await
    }

    /// Apply a partial update. The owner never changes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        req: UpdateProject,
    ) -> Result<Project, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Project, Action::Edit, None)?;
        let project = self.find(id).await?;
        self.gate.require(
            &ctx.actor,
            Resource::Project,
            Action::Edit,
            Some(&Target::owned_by(project.user_id)),
        )?;

        let data = UpdateProject {
            title: req.title.map(|t| required("Title", &t)).transpose()?,
            description: req
                .description
                .map(|d| required("Description", &d))
                .transpose()?,
            ..req
        };

        let updated = self.projects.update(id, &data).await?;
        info!(project_id = %id, member_id = ?ctx.member_id(), "Project updated");
        Ok(updated)
    }

    /// Delete a project.
    pub async fn delete(&self, ctx: &RequestContext, id: ProjectId) -> Result<(), AppError> {
        self.gate
            .require(&ctx.actor, Resource::Project, Action::Delete, None)?;
        let project = self.find(id).await?;
        self.gate.require(
            &ctx.actor,
            Resource::Project,
            Action::Delete,
            Some(&Target::owned_by(project.user_id)),
        )?;

        self.projects.delete(id).await?;
        info!(project_id = %id, member_id = ?ctx.member_id(), "Project deleted");
        Ok(())
    }

    async fn find(&self, id: ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }
}
