//! Member role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles in the club hierarchy.
///
/// Roles are ordered by privilege level: SuperAdmin > Admin > Member.
/// Being signed out is not a role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "member_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Regular member: manages their own content.
    #[default]
    Member,
    /// Moderates blogs, manages events, sees everyone's content.
    Admin,
    /// Manages members and invitations.
    SuperAdmin,
}

impl MemberRole {
    /// All roles, lowest first.
    pub const ALL: [MemberRole; 3] = [Self::Member, Self::Admin, Self::SuperAdmin];

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Member => 1,
            Self::Admin => 2,
            Self::SuperAdmin => 3,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &MemberRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid member role: '{s}'. Expected one of: member, admin, super_admin"
            ))),
        }
    }
}
