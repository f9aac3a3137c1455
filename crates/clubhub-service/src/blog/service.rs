//! Blog CRUD. Every edit sends the blog back to the moderation queue.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use clubhub_auth::rbac::{Action, AuthorizationGate, Resource, Target};
use clubhub_core::error::AppError;
use clubhub_core::types::{BlogId, ListScope};
use clubhub_database::store::BlogStore;
use clubhub_entity::blog::{Blog, BlogStatus, CreateBlog, UpdateBlog};

use crate::context::RequestContext;
use crate::required;

/// Fields supplied by the caller when writing a blog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBlog {
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
}

/// Blog operations for authors.
#[derive(Debug, Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogStore>,
    gate: Arc<AuthorizationGate>,
}

impl BlogService {
    /// Creates a new blog service.
    pub fn new(blogs: Arc<dyn BlogStore>, gate: Arc<AuthorizationGate>) -> Self {
        Self { blogs, gate }
    }

    /// Write a blog. It starts out pending review.
    pub async fn create(&self, ctx: &RequestContext, req: NewBlog) -> Result<Blog, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Blog, Action::Create, None)?;

        let data = CreateBlog {
            user_id: identity.member_id,
            title: required("Title", &req.title)?,
            content: required("Content", &req.content)?,
        };

        let blog = self.blogs.create(&data).await?;
        info!(blog_id = %blog.id, owner = %blog.user_id, "Blog submitted for review");
        Ok(blog)
    }

    /// Blogs visible to the caller, optionally filtered by status.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<BlogStatus>,
    ) -> Result<Vec<Blog>, AppError> {
        let scope = self.gate.list_scope(&ctx.actor, Resource::Blog)?;
        self.blogs.list(scope, status).await
    }

    /// The caller's own blogs, whatever their role.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        status: Option<BlogStatus>,
    ) -> Result<Vec<Blog>, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Blog, Action::List, None)?;
        self.blogs
            .list(ListScope::OwnedBy(identity.member_id), status)
            .await
    }

    /// Read one blog.
    pub async fn get(&self, ctx: &RequestContext, id: BlogId) -> Result<Blog, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Blog, Action::Read, None)?;
        self.find(id).await
    }

    /// Edit title or content. The blog goes back to `pending`; owners cannot
    /// edit a blog that has already been approved or rejected.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: BlogId,
        req: UpdateBlog,
    ) -> Result<Blog, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Blog, Action::Edit, None)?;
        let blog = self.find(id).await?;
        self.gate
            .require(&ctx.actor, Resource::Blog, Action::Edit, Some(&Target::blog(&blog)))?;

        let data = UpdateBlog {
            title: req.title.map(|t| required("Title", &t)).transpose()?,
            content: req.content.map(|c| required("Content", &c)).transpose()?,
        };

        let updated = self.blogs.update_content(id, &data).await?;
        info!(
            blog_id = %id,
            member_id = ?ctx.member_id(),
            previous = %blog.status,
            "Blog edited and returned to review"
        );
        Ok(updated)
    }

    /// Delete a blog.
    pub async fn delete(&self, ctx: &RequestContext, id: BlogId) -> Result<(), AppError> {
        self.gate
            .require(&ctx.actor, Resource::Blog, Action::Delete, None)?;
        let blog = self.find(id).await?;
        self.gate.require(
            &ctx.actor,
            Resource::Blog,
            Action::Delete,
            Some(&Target::owned_by(blog.user_id)),
        )?;

        self.blogs.delete(id).await?;
        info!(blog_id = %id, member_id = ?ctx.member_id(), "Blog deleted");
        Ok(())
    }

    async fn find(&self, id: BlogId) -> Result<Blog, AppError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use clubhub_core::error::ErrorKind;
    use clubhub_database::Stores;
    use clubhub_entity::member::MemberRole;

    use super::*;
    use crate::testing::{gate, sign_up};

    fn post(title: &str) -> NewBlog {
        NewBlog {
            title: title.into(),
            content: "Words".into(),
        }
    }

    fn retitle(title: &str) -> UpdateBlog {
        UpdateBlog {
            title: Some(title.into()),
            content: None,
        }
    }

    #[tokio::test]
    async fn test_new_blogs_are_pending() {
        let stores = Stores::memory();
        let service = BlogService::new(stores.blogs.clone(), gate());
        let (_, ctx) = sign_up(&stores, "ada@club.test", MemberRole::Member).await;

        let blog = service.create(&ctx, post("Hello")).await.unwrap();
        assert_eq!(blog.status, BlogStatus::Pending);
    }

    #[tokio::test]
    async fn test_owner_locked_after_approval() {
        let stores = Stores::memory();
        let service = BlogService::new(stores.blogs.clone(), gate());
        let (_, ctx) = sign_up(&stores, "ada@club.test", MemberRole::Member).await;

        let blog = service.create(&ctx, post("Hello")).await.unwrap();
        stores
            .blogs
            .set_status(blog.id, BlogStatus::Approved)
            .await
            .unwrap();

        let err = service
            .update(&ctx, blog.id, retitle("Sneaky"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ResourceLocked);
        assert_eq!(service.get(&ctx, blog.id).await.unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn test_admin_edit_of_judged_blog_resets_to_pending() {
        let stores = Stores::memory();
        let service = BlogService::new(stores.blogs.clone(), gate());
        let (_, ada) = sign_up(&stores, "ada@club.test", MemberRole::Member).await;
        let (_, admin) = sign_up(&stores, "root@club.test", MemberRole::Admin).await;

        let blog = service.create(&ada, post("Hello")).await.unwrap();
        stores
            .blogs
            .set_status(blog.id, BlogStatus::Rejected)
            .await
            .unwrap();

        let edited = service
            .update(&admin, blog.id, retitle("Fixed typo"))
            .await
            .unwrap();
        assert_eq!(edited.status, BlogStatus::Pending);
        assert_eq!(edited.title, "Fixed typo");
    }

    #[tokio::test]
    async fn test_pending_edit_stays_pending() {
        let stores = Stores::memory();
        let service = BlogService::new(stores.blogs.clone(), gate());
        let (_, ctx) = sign_up(&stores, "ada@club.test", MemberRole::Member).await;

        let blog = service.create(&ctx, post("Hello")).await.unwrap();
        let edited = service.update(&ctx, blog.id, retitle("Hi")).await.unwrap();
        assert_eq!(edited.status, BlogStatus::Pending);
        assert!(edited.updated_at >= blog.updated_at);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let stores = Stores::memory();
        let service = BlogService::new(stores.blogs.clone(), gate());
        let (_, ada) = sign_up(&stores, "ada@club.test", MemberRole::Member).await;
        let (_, bob) = sign_up(&stores, "bob@club.test", MemberRole::Member).await;
        let (_, admin) = sign_up(&stores, "root@club.test", MemberRole::Admin).await;

        let first = service.create(&ada, post("One")).await.unwrap();
        service.create(&ada, post("Two")).await.unwrap();
        service.create(&bob, post("Three")).await.unwrap();
        stores
            .blogs
            .set_status(first.id, BlogStatus::Approved)
            .await
            .unwrap();

        assert_eq!(service.list(&ada, None).await.unwrap().len(), 2);
        assert_eq!(service.list(&admin, None).await.unwrap().len(), 3);
        assert_eq!(
            service
                .list(&admin, Some(BlogStatus::Approved))
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            service
                .list_mine(&ada, Some(BlogStatus::Pending))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_member_cannot_delete_others_blog() {
        let stores = Stores::memory();
        let service = BlogService::new(stores.blogs.clone(), gate());
        let (_, ada) = sign_up(&stores, "ada@club.test", MemberRole::Member).await;
        let (_, bob) = sign_up(&stores, "bob@club.test", MemberRole::Member).await;

        let blog = service.create(&ada, post("Hello")).await.unwrap();
        let err = service.delete(&bob, blog.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotOwner);
        service.delete(&ada, blog.id).await.unwrap();
    }
}
