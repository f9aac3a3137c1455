//! Row scopes applied to list queries.

use serde::{Deserialize, Serialize};

use super::id::MemberId;

/// The set of rows a list query may return.
///
/// Privileged callers see every row; everyone else is narrowed to the rows
/// they own. Narrowing is applied to the query itself, so a narrowed list
/// call never fails just because other members' rows exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "owner", rename_all = "snake_case")]
pub enum ListScope {
    /// No owner filter.
    All,
    /// Only rows whose owner reference equals the given member.
    OwnedBy(MemberId),
}

impl ListScope {
    /// Returns the owner filter, if any.
    pub fn owner(&self) -> Option<MemberId> {
        match self {
            Self::All => None,
            Self::OwnedBy(id) => Some(*id),
        }
    }

    /// Whether a row owned by `owner` falls inside this scope.
    pub fn includes(&self, owner: MemberId) -> bool {
        match self {
            Self::All => true,
            Self::OwnedBy(id) => *id == owner,
        }
    }
}
