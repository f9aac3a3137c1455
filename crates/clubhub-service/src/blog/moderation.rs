//! The blog moderation queue.

use std::sync::Arc;

use tracing::info;

use clubhub_auth::rbac::{Action, AuthorizationGate, Resource};
use clubhub_core::error::AppError;
use clubhub_core::types::{BlogId, ListScope};
use clubhub_database::store::BlogStore;
use clubhub_entity::blog::{Blog, BlogStatus, ModerationVerdict};

use crate::context::RequestContext;

/// Review and judge submitted blogs.
#[derive(Debug, Clone)]
pub struct ModerationService {
    blogs: Arc<dyn BlogStore>,
    gate: Arc<AuthorizationGate>,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(blogs: Arc<dyn BlogStore>, gate: Arc<AuthorizationGate>) -> Self {
        Self { blogs, gate }
    }

    /// Every blog waiting for review.
    pub async fn pending(&self, ctx: &RequestContext) -> Result<Vec<Blog>, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Blog, Action::Review, None)?;
        self.blogs
            .list(ListScope::All, Some(BlogStatus::Pending))
            .await
    }

    /// Approve or reject a blog. Any status may be judged again.
    pub async fn moderate(
        &self,
        ctx: &RequestContext,
        id: BlogId,
        verdict: ModerationVerdict,
    ) -> Result<Blog, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Blog, Action::Moderate, None)?;

        let blog = self
            .blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))?;

        let status = BlogStatus::from(verdict);
        let judged = self.blogs.set_status(blog.id, status).await?;
        info!(
            blog_id = %id,
            moderator = %identity.member_id,
            from = %blog.status,
            to = %status,
            "Blog moderated"
        );
        Ok(judged)
    }
}
