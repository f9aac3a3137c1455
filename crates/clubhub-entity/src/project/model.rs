//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clubhub_core::types::{MemberId, ProjectId};

/// Progress of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Still being worked on.
    #[default]
    InProgress,
    /// Finished.
    Completed,
}

/// A project showcased by a member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Owning member. Assigned on create and never changed.
    pub user_id: MemberId,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Source repository link.
    pub github_url: Option<String>,
    /// Deployed site link.
    pub live_url: Option<String>,
    /// Progress.
    pub status: ProjectStatus,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Owner; always the caller.
    pub user_id: MemberId,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Source repository link.
    pub github_url: Option<String>,
    /// Deployed site link.
    pub live_url: Option<String>,
    /// Initial progress.
    pub status: ProjectStatus,
}

/// Partial project update. Ownership is not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New repository link.
    pub github_url: Option<String>,
    /// New site link.
    pub live_url: Option<String>,
    /// New progress.
    pub status: Option<ProjectStatus>,
}

impl UpdateProject {
    /// Apply this update onto an existing project and bump `updated_at`.
    pub fn apply(&self, project: &mut Project, now: DateTime<Utc>) {
        if let Some(v) = &self.title {
            project.title = v.clone();
        }
        if let Some(v) = &self.description {
            project.description = v.clone();
        }
        if let Some(v) = &self.github_url {
            project.github_url = Some(v.clone());
        }
        if let Some(v) = &self.live_url {
            project.live_url = Some(v.clone());
        }
        if let Some(v) = self.status {
            project.status = v;
        }
        project.updated_at = now;
    }
}
