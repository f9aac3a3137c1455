//! PostgreSQL repository implementations of the store traits.

pub mod blog;
pub mod event;
pub mod invitation;
pub mod member;
pub mod project;
pub mod session;

use std::sync::Arc;

use sqlx::PgPool;

use clubhub_core::error::{AppError, ErrorKind};

pub use blog::BlogRepository;
pub use event::EventRepository;
pub use invitation::InvitationRepository;
pub use member::MemberRepository;
pub use project::ProjectRepository;
pub use session::SessionRepository;

use crate::store::Stores;

impl Stores {
    /// Build every store on top of one PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            members: Arc::new(MemberRepository::new(pool.clone())),
            projects: Arc::new(ProjectRepository::new(pool.clone())),
            blogs: Arc::new(BlogRepository::new(pool.clone())),
            events: Arc::new(EventRepository::new(pool.clone())),
            invitations: Arc::new(InvitationRepository::new(pool.clone())),
            sessions: Arc::new(SessionRepository::new(pool)),
        }
    }
}

/// Map a failed `INSERT`/`UPDATE` into `Conflict` on unique violations,
/// `Database` otherwise.
pub(crate) fn map_write_error(err: sqlx::Error, context: &str, conflict: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::conflict(conflict.to_string())
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}

pub(crate) fn begin_error(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
}

pub(crate) fn commit_error(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
}
