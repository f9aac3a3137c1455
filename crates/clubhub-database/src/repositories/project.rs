//! Project repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::{ListScope, ProjectId};
use clubhub_entity::project::{CreateProject, Project, UpdateProject};

use crate::store::ProjectStore;

/// Repository for project CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepository {
    async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, user_id, title, description, github_url, live_url, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(ProjectId::new())
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.github_url)
        .bind(&data.live_url)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    async fn list(&self, scope: ListScope) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE ($1::uuid IS NULL OR user_id = $1) \
             ORDER BY created_at DESC",
        )
        .bind(scope.owner())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    async fn update(&self, id: ProjectId, data: &UpdateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET title = COALESCE($2, title), \
                                 description = COALESCE($3, description), \
                                 github_url = COALESCE($4, github_url), \
                                 live_url = COALESCE($5, live_url), \
                                 status = COALESCE($6, status), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.github_url)
        .bind(&data.live_url)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    async fn delete(&self, id: ProjectId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Project {id} not found")));
        }
        Ok(())
    }

    async fn count(&self, scope: ListScope) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE ($1::uuid IS NULL OR user_id = $1)")
            .bind(scope.owner())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count projects", e))
    }
}
