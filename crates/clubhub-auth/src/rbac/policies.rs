//! Capability table: what each (resource, action) pair requires.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use clubhub_entity::member::MemberRole;

/// A kind of row the gate protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Member projects.
    Project,
    /// Member blogs.
    Blog,
    /// Club events.
    Event,
    /// Invitations to join.
    Invitation,
    /// Members and their profiles.
    Member,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Project => "project",
            Self::Blog => "blog",
            Self::Event => "event",
            Self::Invitation => "invitation",
            Self::Member => "member",
        })
    }
}

/// Something an actor wants to do to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a row.
    Create,
    /// List rows.
    List,
    /// Read one row.
    Read,
    /// Edit one row.
    Edit,
    /// Delete one row.
    Delete,
    /// Approve or reject a blog.
    Moderate,
    /// See the moderation queue.
    Review,
    /// Change a member's role.
    ChangeRole,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Read => "view",
            Self::Edit => "update",
            Self::Delete => "delete",
            Self::Moderate => "moderate",
            Self::Review => "review",
            Self::ChangeRole => "change the role of",
        })
    }
}

/// Whether the actor must own the target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ownership {
    /// Any actor with the minimum role may act on any row.
    Ignored,
    /// The actor must own the row unless their role is at least `bypass`.
    /// For `List` this narrows the listing to the actor's own rows.
    Required {
        /// Lowest role that acts on every row.
        bypass: MemberRole,
    },
}

/// Requirements of one (resource, action) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Lowest role allowed at all.
    pub min_role: MemberRole,
    /// Ownership rule.
    pub ownership: Ownership,
    /// Owners cannot act once a moderation outcome is recorded.
    pub moderation_lock: bool,
}

impl Capability {
    /// Any row, from `min_role` up.
    pub const fn role(min_role: MemberRole) -> Self {
        Self {
            min_role,
            ownership: Ownership::Ignored,
            moderation_lock: false,
        }
    }

    /// Own rows from `min_role` up; every row from `bypass` up.
    pub const fn owned(min_role: MemberRole, bypass: MemberRole) -> Self {
        Self {
            min_role,
            ownership: Ownership::Required { bypass },
            moderation_lock: false,
        }
    }

    /// Adds the moderation lock.
    pub const fn locked(mut self) -> Self {
        self.moderation_lock = true;
        self
    }
}

/// The capability table consulted by the authorization gate.
///
/// A pair missing from the table is allowed to no one.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    table: HashMap<(Resource, Action), Capability>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Action::*;
        use MemberRole::{Admin, Member as M, SuperAdmin};

        let entries = [
            // Projects: members manage their own; admins manage all.
            ((Resource::Project, Create), Capability::role(M)),
            ((Resource::Project, List), Capability::owned(M, Admin)),
            ((Resource::Project, Read), Capability::role(M)),
            ((Resource::Project, Edit), Capability::owned(M, Admin)),
            ((Resource::Project, Delete), Capability::owned(M, Admin)),
            // Blogs: as projects, plus moderation.
            ((Resource::Blog, Create), Capability::role(M)),
            ((Resource::Blog, List), Capability::owned(M, Admin)),
            ((Resource::Blog, Read), Capability::role(M)),
            ((Resource::Blog, Edit), Capability::owned(M, Admin).locked()),
            ((Resource::Blog, Delete), Capability::owned(M, Admin)),
            ((Resource::Blog, Moderate), Capability::role(Admin)),
            ((Resource::Blog, Review), Capability::role(Admin)),
            // Events: created by admins, visible to every member.
            ((Resource::Event, Create), Capability::role(Admin)),
            ((Resource::Event, List), Capability::role(M)),
            ((Resource::Event, Read), Capability::role(M)),
            ((Resource::Event, Edit), Capability::owned(M, Admin)),
            ((Resource::Event, Delete), Capability::owned(M, Admin)),
            // Invitations: super admins only.
            ((Resource::Invitation, Create), Capability::role(SuperAdmin)),
            ((Resource::Invitation, List), Capability::role(SuperAdmin)),
            ((Resource::Invitation, Delete), Capability::role(SuperAdmin)),
            // Members: own profile for everyone, the rest for super admins.
            ((Resource::Member, List), Capability::role(SuperAdmin)),
            ((Resource::Member, Read), Capability::owned(M, SuperAdmin)),
            ((Resource::Member, Edit), Capability::owned(M, SuperAdmin)),
            ((Resource::Member, ChangeRole), Capability::role(SuperAdmin)),
            ((Resource::Member, Delete), Capability::role(SuperAdmin)),
        ];

        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Returns the capability for a pair, if any role may perform it.
    pub fn capability(&self, resource: Resource, action: Action) -> Option<&Capability> {
        self.table.get(&(resource, action))
    }

    /// Replace or add a capability.
    pub fn with_capability(
        mut self,
        resource: Resource,
        action: Action,
        capability: Capability,
    ) -> Self {
        self.table.insert((resource, action), capability);
        self
    }

    /// Iterate over every entry.
    pub fn iter(&self) -> impl Iterator<Item = (&(Resource, Action), &Capability)> {
        self.table.iter()
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
