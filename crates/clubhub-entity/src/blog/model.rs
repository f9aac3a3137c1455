//! Blog entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clubhub_core::types::{BlogId, MemberId};

use super::status::BlogStatus;

/// A blog post written by a member and reviewed by an admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    /// Unique blog identifier.
    pub id: BlogId,
    /// Author. Assigned on create and never changed.
    pub user_id: MemberId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Moderation status.
    pub status: BlogStatus,
    /// When the blog was created.
    pub created_at: DateTime<Utc>,
    /// When the blog was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a blog. New blogs always start as pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlog {
    /// Author; always the caller.
    pub user_id: MemberId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
}

/// Content edit. Status is not part of an edit; see `BlogStatus`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlog {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
}

impl UpdateBlog {
    /// Apply the edit: new content, status back to pending, fresh timestamp.
    pub fn apply(&self, blog: &mut Blog, now: DateTime<Utc>) {
        if let Some(v) = &self.title {
            blog.title = v.clone();
        }
        if let Some(v) = &self.content {
            blog.content = v.clone();
        }
        blog.status = BlogStatus::Pending;
        blog.updated_at = now;
    }
}
