//! Blog repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::{BlogId, ListScope};
use clubhub_entity::blog::{Blog, BlogStatus, CreateBlog, UpdateBlog};

use crate::store::BlogStore;

/// Repository for blog CRUD, listing and moderation.
#[derive(Debug, Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Create a new blog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for BlogRepository {
    async fn create(&self, data: &CreateBlog) -> AppResult<Blog> {
        sqlx::query_as::<_, Blog>(
            "INSERT INTO blogs (id, user_id, title, content, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(BlogId::new())
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(BlogStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create blog", e))
    }

    async fn find_by_id(&self, id: BlogId) -> AppResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find blog", e))
    }

    async fn list(&self, scope: ListScope, status: Option<BlogStatus>) -> AppResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
               AND ($2::blog_status IS NULL OR status = $2) \
             ORDER BY created_at DESC",
        )
        .bind(scope.owner())
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list blogs", e))
    }

    async fn update_content(&self, id: BlogId, data: &UpdateBlog) -> AppResult<Blog> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET title = COALESCE($2, title), \
                              content = COALESCE($3, content), \
                              status = $4, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(BlogStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update blog", e))?
        .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))
    }

    async fn set_status(&self, id: BlogId, status: BlogStatus) -> AppResult<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to moderate blog", e))?
        .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))?;

        debug!(blog_id = %id, status = %status, "Blog status changed");
        Ok(blog)
    }

    async fn delete(&self, id: BlogId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete blog", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Blog {id} not found")));
        }
        Ok(())
    }

    async fn count(&self, scope: ListScope) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM blogs WHERE ($1::uuid IS NULL OR user_id = $1)")
            .bind(scope.owner())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count blogs", e))
    }
}
