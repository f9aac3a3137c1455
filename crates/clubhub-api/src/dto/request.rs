//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use clubhub_entity::blog::{BlogStatus, ModerationVerdict, UpdateBlog};
use clubhub_entity::event::UpdateEvent;
use clubhub_entity::member::{MemberRole, UpdateProfile};
use clubhub_entity::project::{ProjectStatus, UpdateProject};
use clubhub_service::blog::NewBlog;
use clubhub_service::event::{EventWhen, NewEvent};
use clubhub_service::invitation::{NewInvitation, RedeemInvitation};
use clubhub_service::project::NewProject;

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create project request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Repository link.
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: Option<String>,
    /// Live site link.
    #[validate(url(message = "Live URL must be a valid URL"))]
    pub live_url: Option<String>,
    /// Status.
    pub status: Option<ProjectStatus>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            github_url: req.github_url,
            live_url: req.live_url,
            status: req.status,
        }
    }
}

/// Update project request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Repository link.
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: Option<String>,
    /// Live site link.
    #[validate(url(message = "Live URL must be a valid URL"))]
    pub live_url: Option<String>,
    /// Status.
    pub status: Option<ProjectStatus>,
}

impl From<UpdateProjectRequest> for UpdateProject {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            github_url: req.github_url,
            live_url: req.live_url,
            status: req.status,
        }
    }
}

/// Create blog request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBlogRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Body.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

impl From<CreateBlogRequest> for NewBlog {
    fn from(req: CreateBlogRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Update blog request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    /// Body.
    pub content: Option<String>,
}

impl From<UpdateBlogRequest> for UpdateBlog {
    fn from(req: UpdateBlogRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Moderation decision.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ModerateBlogRequest {
    /// `approved` or `rejected`.
    pub status: ModerationVerdict,
}

/// Create event request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// When it happens (RFC 3339).
    pub date: DateTime<Utc>,
    /// Where it happens.
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
        }
    }
}

/// Update event request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
    /// New location.
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

impl From<UpdateEventRequest> for UpdateEvent {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
        }
    }
}

/// Create invitation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    /// Invitee email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Role to grant; `member` when omitted.
    #[serde(default)]
    pub role: MemberRole,
}

impl From<CreateInvitationRequest> for NewInvitation {
    fn from(req: CreateInvitationRequest) -> Self {
        Self {
            email: req.email,
            role: req.role,
        }
    }
}

/// Invitation redemption request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedeemInvitationRequest {
    /// The token from the invitation.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// New password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Given name.
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
}

impl From<RedeemInvitationRequest> for RedeemInvitation {
    fn from(req: RedeemInvitationRequest) -> Self {
        Self {
            token: req.token,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Own profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Given name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    /// Biography.
    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,
    /// Avatar location.
    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            avatar_url: req.avatar_url,
        }
    }
}

/// Role change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// New role.
    pub role: MemberRole,
}

/// `GET /api/projects` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    /// Only the caller's own projects.
    #[serde(default)]
    pub mine: bool,
}

/// `GET /api/blogs` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogListQuery {
    /// Filter by status.
    pub status: Option<BlogStatus>,
    /// Only the caller's own blogs.
    #[serde(default)]
    pub mine: bool,
}

/// `GET /api/events` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    /// Time window, `all` when omitted.
    #[serde(default)]
    pub when: EventWhen,
    /// Only events the caller created.
    #[serde(default)]
    pub mine: bool,
}
