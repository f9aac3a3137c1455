//! Store traits for pluggable persistence backends.
//!
//! Services only ever see these traits. The PostgreSQL repositories in
//! [`crate::repositories`] are the production backend; the `memory`
//! feature adds an in-process backend with the same semantics.

use std::sync::Arc;

use async_trait::async_trait;

use clubhub_core::result::AppResult;
use clubhub_core::types::{
    BlogId, EventId, InvitationId, ListScope, MemberId, ProjectId, SessionId,
};
use clubhub_entity::blog::{Blog, BlogStatus, CreateBlog, UpdateBlog};
use clubhub_entity::event::{CreateEvent, Event, EventWindow, UpdateEvent};
use clubhub_entity::invitation::{CreateInvitation, Invitation, Redemption};
use clubhub_entity::member::{
    CreateMember, CreateProfile, Member, MemberRole, Profile, UpdateProfile,
};
use clubhub_entity::project::{CreateProject, Project, UpdateProject};
use clubhub_entity::session::{CreateSession, Session};

/// Members and their dependent profiles.
#[async_trait]
pub trait MemberStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a member by primary key.
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>>;

    /// Find a member by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>>;

    /// List all members, newest first.
    async fn list(&self) -> AppResult<Vec<Member>>;

    /// Count all members.
    async fn count(&self) -> AppResult<i64>;

    /// Insert a member and its profile together. Duplicate emails are a `Conflict`.
    async fn create(&self, member: &CreateMember, profile: &CreateProfile)
    -> AppResult<(Member, Profile)>;

    /// Change a member's role.
    async fn update_role(&self, id: MemberId, role: MemberRole) -> AppResult<Member>;

    /// Find the profile belonging to a member.
    async fn find_profile(&self, member_id: MemberId) -> AppResult<Option<Profile>>;

    /// Update a profile and recompute the member's `profile_completed` flag.
    async fn update_profile(&self, member_id: MemberId, data: &UpdateProfile)
    -> AppResult<Profile>;

    /// Delete sessions, profile, then the member, all or nothing.
    async fn delete(&self, id: MemberId) -> AppResult<()>;
}

/// Projects.
#[async_trait]
pub trait ProjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a project.
    async fn create(&self, data: &CreateProject) -> AppResult<Project>;

    /// Find a project by primary key.
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>>;

    /// List projects inside `scope`, newest first.
    async fn list(&self, scope: ListScope) -> AppResult<Vec<Project>>;

    /// Apply a partial update.
    async fn update(&self, id: ProjectId, data: &UpdateProject) -> AppResult<Project>;

    /// Delete a project.
    async fn delete(&self, id: ProjectId) -> AppResult<()>;

    /// Count projects inside `scope`.
    async fn count(&self, scope: ListScope) -> AppResult<i64>;
}

/// Blogs.
#[async_trait]
pub trait BlogStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a blog in the `pending` state.
    async fn create(&self, data: &CreateBlog) -> AppResult<Blog>;

    /// Find a blog by primary key.
    async fn find_by_id(&self, id: BlogId) -> AppResult<Option<Blog>>;

    /// List blogs inside `scope`, optionally filtered by status, newest first.
    async fn list(&self, scope: ListScope, status: Option<BlogStatus>) -> AppResult<Vec<Blog>>;

    /// Edit content. Always resets the status to `pending`.
    async fn update_content(&self, id: BlogId, data: &UpdateBlog) -> AppResult<Blog>;

    /// Record a moderation outcome.
    async fn set_status(&self, id: BlogId, status: BlogStatus) -> AppResult<Blog>;

    /// Delete a blog.
    async fn delete(&self, id: BlogId) -> AppResult<()>;

    /// Count blogs inside `scope`.
    async fn count(&self, scope: ListScope) -> AppResult<i64>;
}

/// Events.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert an event.
    async fn create(&self, data: &CreateEvent) -> AppResult<Event>;

    /// Find an event by primary key.
    async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>>;

    /// List events in a time window.
    async fn list(&self, window: EventWindow) -> AppResult<Vec<Event>>;

    /// List events created by one member, ascending by date.
    async fn list_by_creator(&self, member_id: MemberId) -> AppResult<Vec<Event>>;

    /// Apply a partial update.
    async fn update(&self, id: EventId, data: &UpdateEvent) -> AppResult<Event>;

    /// Delete an event.
    async fn delete(&self, id: EventId) -> AppResult<()>;

    /// Count all events.
    async fn count(&self) -> AppResult<i64>;
}

/// Invitations.
#[async_trait]
pub trait InvitationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert an invitation.
    async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation>;

    /// Find an invitation by primary key.
    async fn find_by_id(&self, id: InvitationId) -> AppResult<Option<Invitation>>;

    /// Find an invitation by the hash of its token.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Invitation>>;

    /// List all invitations, newest first.
    async fn list(&self) -> AppResult<Vec<Invitation>>;

    /// Delete an invitation.
    async fn delete(&self, id: InvitationId) -> AppResult<()>;

    /// Consume the invitation and create the member with its profile.
    ///
    /// Runs as one unit: the invitation is marked used only if it is still
    /// unused and unexpired (otherwise `TokenAlreadyUsed`), and a failure at
    /// any step leaves no trace.
    async fn redeem(&self, redemption: &Redemption) -> AppResult<(Member, Profile)>;
}

/// Sign-in sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a session.
    async fn create(&self, data: &CreateSession) -> AppResult<Session>;

    /// Find a session by primary key.
    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>>;

    /// Mark a session revoked. Revoking twice is a no-op.
    async fn revoke(&self, id: SessionId) -> AppResult<()>;
}

/// The full set of stores the application is built from.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Member store.
    pub members: Arc<dyn MemberStore>,
    /// Project store.
    pub projects: Arc<dyn ProjectStore>,
    /// Blog store.
    pub blogs: Arc<dyn BlogStore>,
    /// Event store.
    pub events: Arc<dyn EventStore>,
    /// Invitation store.
    pub invitations: Arc<dyn InvitationStore>,
    /// Session store.
    pub sessions: Arc<dyn SessionStore>,
}
