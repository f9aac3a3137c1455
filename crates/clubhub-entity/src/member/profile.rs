//! Member profile, a dependent row owned by exactly one member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clubhub_core::types::{MemberId, ProfileId};

/// Public-facing details of a member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Unique profile identifier.
    pub id: ProfileId,
    /// Owning member.
    pub member_id: MemberId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-form biography.
    pub bio: Option<String>,
    /// Avatar image location.
    pub avatar_url: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Both name fields are filled in.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

/// Data required to create a profile alongside a new member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New avatar location.
    pub avatar_url: Option<String>,
}

impl UpdateProfile {
    /// Apply this update onto an existing profile.
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(v) = &self.first_name {
            profile.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            profile.last_name = v.clone();
        }
        if let Some(v) = &self.bio {
            profile.bio = Some(v.clone());
        }
        if let Some(v) = &self.avatar_url {
            profile.avatar_url = Some(v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: ProfileId::new(),
            member_id: MemberId::new(),
            first_name: String::new(),
            last_name: String::new(),
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_partial_update() {
        let mut p = profile();
        UpdateProfile {
            first_name: Some("Ada".into()),
            bio: Some("hi".into()),
            ..Default::default()
        }
        .apply(&mut p);
        assert_eq!(p.first_name, "Ada");
        assert_eq!(p.bio.as_deref(), Some("hi"));
        assert!(!p.is_complete());

        UpdateProfile {
            last_name: Some("Lovelace".into()),
            ..Default::default()
        }
        .apply(&mut p);
        assert!(p.is_complete());
    }
}
