//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use clubhub_auth::rbac::AuthorizationGate;
use clubhub_auth::session::{SessionGate, SessionManager};
use clubhub_core::config::AppConfig;
use clubhub_database::Stores;
use clubhub_service::{
    AdminMemberService, BlogService, DashboardService, EventService, InvitationService,
    MemberService, ModerationService, ProjectService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Sign-in, sign-out and actor resolution
    pub session_manager: Arc<SessionManager>,
    /// Redirect policy for the protected area
    pub session_gate: Arc<SessionGate>,
    /// Role, ownership and moderation checks
    pub gate: Arc<AuthorizationGate>,

    // ── Services ─────────────────────────────────────────────
    /// Project service
    pub projects: Arc<ProjectService>,
    /// Blog service
    pub blogs: Arc<BlogService>,
    /// Blog moderation service
    pub moderation: Arc<ModerationService>,
    /// Event service
    pub events: Arc<EventService>,
    /// Invitation service
    pub invitations: Arc<InvitationService>,
    /// Own-profile service
    pub members: Arc<MemberService>,
    /// Member administration service
    pub admin_members: Arc<AdminMemberService>,
    /// Dashboard overview service
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let gate = Arc::new(AuthorizationGate::new());

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&stores.members),
            Arc::clone(&stores.sessions),
            &config.auth,
            &config.session,
        ));
        let session_gate = Arc::new(SessionGate::new(&config.gate));

        let projects = Arc::new(ProjectService::new(
            Arc::clone(&stores.projects),
            Arc::clone(&gate),
        ));
        let blogs = Arc::new(BlogService::new(Arc::clone(&stores.blogs), Arc::clone(&gate)));
        let moderation = Arc::new(ModerationService::new(
            Arc::clone(&stores.blogs),
            Arc::clone(&gate),
        ));
        let events = Arc::new(EventService::new(
            Arc::clone(&stores.events),
            Arc::clone(&gate),
        ));
        let invitations = Arc::new(InvitationService::new(
            Arc::clone(&stores.invitations),
            Arc::clone(&stores.members),
            Arc::clone(&gate),
            &config.auth,
            &config.invitation,
        ));
        let members = Arc::new(MemberService::new(
            Arc::clone(&stores.members),
            Arc::clone(&gate),
        ));
        let admin_members = Arc::new(AdminMemberService::new(
            Arc::clone(&stores.members),
            Arc::clone(&gate),
        ));
        let dashboard = Arc::new(DashboardService::new(stores, Arc::clone(&gate)));

        Self {
            config: Arc::new(config),
            session_manager,
            session_gate,
            gate,
            projects,
            blogs,
            moderation,
            events,
            invitations,
            members,
            admin_members,
            dashboard,
        }
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}
