//! Convenience result type alias for ClubHub.

use crate::error::AppError;

/// A specialized `Result` type for ClubHub operations.
pub type AppResult<T> = Result<T, AppError>;
