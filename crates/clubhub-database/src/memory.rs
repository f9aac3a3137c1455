//! In-memory implementation of every store trait.
//!
//! All tables live behind one `RwLock`, so every write (including invitation
//! redemption and member deletion) is atomic with respect to other callers.
//! Enabled by the `memory` feature; used by tests and local demos.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use clubhub_core::error::AppError;
use clubhub_core::result::AppResult;
use clubhub_core::types::{
    BlogId, EventId, InvitationId, ListScope, MemberId, ProfileId, ProjectId, SessionId,
};
use clubhub_entity::blog::{Blog, BlogStatus, CreateBlog, UpdateBlog};
use clubhub_entity::event::{CreateEvent, Event, EventWindow, UpdateEvent};
use clubhub_entity::invitation::{CreateInvitation, Invitation, Redemption};
use clubhub_entity::member::{
    CreateMember, CreateProfile, Member, MemberRole, MemberStatus, Profile, UpdateProfile,
};
use clubhub_entity::project::{CreateProject, Project, UpdateProject};
use clubhub_entity::session::{CreateSession, Session};

use crate::store::{
    BlogStore, EventStore, InvitationStore, MemberStore, ProjectStore, SessionStore, Stores,
};

#[derive(Debug, Default)]
struct Tables {
    members: HashMap<MemberId, Member>,
    profiles: HashMap<MemberId, Profile>,
    projects: HashMap<ProjectId, Project>,
    blogs: HashMap<BlogId, Blog>,
    events: HashMap<EventId, Event>,
    invitations: HashMap<InvitationId, Invitation>,
    sessions: HashMap<SessionId, Session>,
}

impl Tables {
    fn insert_member(&mut self, data: &CreateMember) -> AppResult<Member> {
        let email = data.email.to_lowercase();
        if self.members.values().any(|m| m.email == email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }
        let now = Utc::now();
        let member = Member {
            id: MemberId::new(),
            email,
            password_hash: data.password_hash.clone(),
            role: data.role,
            status: MemberStatus::Active,
            profile_completed: false,
            invited_by: data.invited_by,
            created_at: now,
            updated_at: now,
        };
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    fn insert_profile(&mut self, member_id: MemberId, data: &CreateProfile) -> Profile {
        let now = Utc::now();
        let profile = Profile {
            id: ProfileId::new(),
            member_id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        self.profiles.insert(member_id, profile.clone());
        profile
    }
}

/// Process-local database holding every table.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a full store set sharing this database.
    pub fn stores(&self) -> Stores {
        Stores {
            members: Arc::new(self.clone()),
            projects: Arc::new(self.clone()),
            blogs: Arc::new(self.clone()),
            events: Arc::new(self.clone()),
            invitations: Arc::new(self.clone()),
            sessions: Arc::new(self.clone()),
        }
    }
}

impl Stores {
    /// Build every store on a fresh in-memory database.
    pub fn memory() -> Self {
        MemoryDatabase::new().stores()
    }
}

#[async_trait]
impl MemberStore for MemoryDatabase {
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        Ok(self.tables.read().await.members.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .members
            .values()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Member>> {
        let mut members: Vec<Member> =
            self.tables.read().await.members.values().cloned().collect();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(members)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.members.len() as i64)
    }

    async fn create(
        &self,
        member: &CreateMember,
        profile: &CreateProfile,
    ) -> AppResult<(Member, Profile)> {
        let mut tables = self.tables.write().await;
        let created = tables.insert_member(member)?;
        let created_profile = tables.insert_profile(created.id, profile);
        Ok((created, created_profile))
    }

    async fn update_role(&self, id: MemberId, role: MemberRole) -> AppResult<Member> {
        let mut tables = self.tables.write().await;
        let member = tables
            .members
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Member {id} not found")))?;
        member.role = role;
        member.updated_at = Utc::now();
        Ok(member.clone())
    }

    async fn find_profile(&self, member_id: MemberId) -> AppResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&member_id).cloned())
    }

    async fn update_profile(
        &self,
        member_id: MemberId,
        data: &UpdateProfile,
    ) -> AppResult<Profile> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let profile = tables.profiles.get_mut(&member_id).ok_or_else(|| {
            AppError::not_found(format!("Profile for member {member_id} not found"))
        })?;
        data.apply(profile);
        profile.updated_at = now;
        let profile = profile.clone();

        if let Some(member) = tables.members.get_mut(&member_id) {
            member.profile_completed = profile.is_complete();
            member.updated_at = now;
        }
        Ok(profile)
    }

    async fn delete(&self, id: MemberId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.members.contains_key(&id) {
            return Err(AppError::not_found(format!("Member {id} not found")));
        }
        tables.sessions.retain(|_, s| s.member_id != id);
        tables.profiles.remove(&id);
        tables.members.remove(&id);
        // Mirrors the foreign keys of the SQL schema: authored rows and
        // issued invitations cascade, `invited_by` is set to NULL.
        tables.projects.retain(|_, p| p.user_id != id);
        tables.blogs.retain(|_, b| b.user_id != id);
        tables.events.retain(|_, e| e.created_by != id);
        tables.invitations.retain(|_, i| i.invited_by != id);
        for member in tables.members.values_mut() {
            if member.invited_by == Some(id) {
                member.invited_by = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for MemoryDatabase {
    async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: ProjectId::new(),
            user_id: data.user_id,
            title: data.title.clone(),
            description: data.description.clone(),
            github_url: data.github_url.clone(),
            live_url: data.live_url.clone(),
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .projects
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list(&self, scope: ListScope) -> AppResult<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .tables
            .read()
            .await
            .projects
            .values()
            .filter(|p| scope.includes(p.user_id))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update(&self, id: ProjectId, data: &UpdateProject) -> AppResult<Project> {
        let mut tables = self.tables.write().await;
        let project = tables
            .projects
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))?;
        data.apply(project, Utc::now());
        Ok(project.clone())
    }

    async fn delete(&self, id: ProjectId) -> AppResult<()> {
        self.tables
            .write()
            .await
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    async fn count(&self, scope: ListScope) -> AppResult<i64> {
        Ok(self
            .tables
            .read()
            .await
            .projects
            .values()
            .filter(|p| scope.includes(p.user_id))
            .count() as i64)
    }
}

#[async_trait]
impl BlogStore for MemoryDatabase {
    async fn create(&self, data: &CreateBlog) -> AppResult<Blog> {
        let now = Utc::now();
        let blog = Blog {
            id: BlogId::new(),
            user_id: data.user_id,
            title: data.title.clone(),
            content: data.content.clone(),
            status: BlogStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: BlogId) -> AppResult<Option<Blog>> {
        Ok(self.tables.read().await.blogs.get(&id).cloned())
    }

    async fn list(&self, scope: ListScope, status: Option<BlogStatus>) -> AppResult<Vec<Blog>> {
        let mut blogs: Vec<Blog> = self
            .tables
            .read()
            .await
            .blogs
            .values()
            .filter(|b| scope.includes(b.user_id))
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }

    async fn update_content(&self, id: BlogId, data: &UpdateBlog) -> AppResult<Blog> {
        let mut tables = self.tables.write().await;
        let blog = tables
            .blogs
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))?;
        data.apply(blog, Utc::now());
        Ok(blog.clone())
    }

    async fn set_status(&self, id: BlogId, status: BlogStatus) -> AppResult<Blog> {
        let mut tables = self.tables.write().await;
        let blog = tables
            .blogs
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))?;
        blog.status = status;
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    async fn delete(&self, id: BlogId) -> AppResult<()> {
        self.tables
            .write()
            .await
            .blogs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))
    }

    async fn count(&self, scope: ListScope) -> AppResult<i64> {
        Ok(self
            .tables
            .read()
            .await
            .blogs
            .values()
            .filter(|b| scope.includes(b.user_id))
            .count() as i64)
    }
}

#[async_trait]
impl EventStore for MemoryDatabase {
    async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        let now = Utc::now();
        let event = Event {
            id: EventId::new(),
            created_by: data.created_by,
            title: data.title.clone(),
            description: data.description.clone(),
            date: data.date,
            location: data.location.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .events
            .insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn list(&self, window: EventWindow) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .tables
            .read()
            .await
            .events
            .values()
            .filter(|e| window.contains(e.date))
            .cloned()
            .collect();
        if window.descending() {
            events.sort_by(|a, b| b.date.cmp(&a.date));
        } else {
            events.sort_by(|a, b| a.date.cmp(&b.date));
        }
        Ok(events)
    }

    async fn list_by_creator(&self, member_id: MemberId) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .tables
            .read()
            .await
            .events
            .values()
            .filter(|e| e.created_by == member_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    async fn update(&self, id: EventId, data: &UpdateEvent) -> AppResult<Event> {
        let mut tables = self.tables.write().await;
        let event = tables
            .events
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))?;
        data.apply(event, Utc::now());
        Ok(event.clone())
    }

    async fn delete(&self, id: EventId) -> AppResult<()> {
        self.tables
            .write()
            .await
            .events
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.events.len() as i64)
    }
}

#[async_trait]
impl InvitationStore for MemoryDatabase {
    async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation> {
        let invitation = Invitation {
            id: InvitationId::new(),
            email: data.email.to_lowercase(),
            role: data.role,
            invited_by: data.invited_by,
            token_hash: data.token_hash.clone(),
            expires_at: data.expires_at,
            used: false,
            used_at: None,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .invitations
            .insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn find_by_id(&self, id: InvitationId) -> AppResult<Option<Invitation>> {
        Ok(self.tables.read().await.invitations.get(&id).cloned())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Invitation>> {
        Ok(self
            .tables
            .read()
            .await
            .invitations
            .values()
            .find(|i| i.token_hash == token_hash)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Invitation>> {
        let mut invitations: Vec<Invitation> =
            self.tables.read().await.invitations.values().cloned().collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }

    async fn delete(&self, id: InvitationId) -> AppResult<()> {
        self.tables
            .write()
            .await
            .invitations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Invitation {id} not found")))
    }

    async fn redeem(&self, redemption: &Redemption) -> AppResult<(Member, Profile)> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let claimable = tables
            .invitations
            .get(&redemption.invitation_id)
            .is_some_and(|i| !i.used && i.expires_at > now);
        if !claimable {
            return Err(AppError::token_already_used(
                "This invitation has already been used",
            ));
        }

        // Insert first so a conflict leaves the invitation untouched.
        let member = tables.insert_member(&redemption.member)?;
        let profile = tables.insert_profile(member.id, &redemption.profile);
        if let Some(invitation) = tables.invitations.get_mut(&redemption.invitation_id) {
            invitation.used = true;
            invitation.used_at = Some(now);
        }
        Ok((member, profile))
    }
}

#[async_trait]
impl SessionStore for MemoryDatabase {
    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        let session = Session {
            id: SessionId::new(),
            member_id: data.member_id,
            user_agent: data.user_agent.clone(),
            created_at: Utc::now(),
            expires_at: data.expires_at,
            revoked_at: None,
        };
        self.tables
            .write()
            .await
            .sessions
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>> {
        Ok(self.tables.read().await.sessions.get(&id).cloned())
    }

    async fn revoke(&self, id: SessionId) -> AppResult<()> {
        if let Some(session) = self.tables.write().await.sessions.get_mut(&id) {
            session.revoked_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }
}
