//! Blog moderation status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a blog is in the moderation flow.
///
/// Edits move a blog back to `Pending`; only moderation moves it to
/// `Approved` or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blog_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    /// Not yet submitted.
    Draft,
    /// Awaiting review.
    Pending,
    /// Published.
    Approved,
    /// Turned down.
    Rejected,
}

impl BlogStatus {
    /// A moderation outcome has been recorded.
    pub fn is_judged(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BlogStatus {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid blog status: '{s}'. Expected one of: draft, pending, approved, rejected"
            ))),
        }
    }
}

/// Outcome an admin can record on a blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationVerdict {
    /// Publish the blog.
    Approved,
    /// Turn the blog down.
    Rejected,
}

impl From<ModerationVerdict> for BlogStatus {
    fn from(v: ModerationVerdict) -> Self {
        match v {
            ModerationVerdict::Approved => Self::Approved,
            ModerationVerdict::Rejected => Self::Rejected,
        }
    }
}
