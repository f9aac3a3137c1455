//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clubhub_core::types::{EventId, MemberId};

/// A club event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Creating member. Assigned on create and never changed.
    pub created_by: MemberId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: Option<String>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Creator; always the caller.
    pub created_by: MemberId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: Option<String>,
}

/// Partial event update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
    /// New location.
    pub location: Option<String>,
}

impl UpdateEvent {
    /// Apply this update onto an existing event and bump `updated_at`.
    pub fn apply(&self, event: &mut Event, now: DateTime<Utc>) {
        if let Some(v) = &self.title {
            event.title = v.clone();
        }
        if let Some(v) = &self.description {
            event.description = v.clone();
        }
        if let Some(v) = self.date {
            event.date = v;
        }
        if let Some(v) = &self.location {
            event.location = Some(v.clone());
        }
        event.updated_at = now;
    }
}

/// Time window for event listings, split at a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventWindow {
    /// Every event, ascending by date.
    All,
    /// Events on or after the instant, ascending by date.
    Upcoming(DateTime<Utc>),
    /// Events before the instant, most recent first.
    Past(DateTime<Utc>),
}

impl EventWindow {
    /// Whether an event dated `date` belongs to this window.
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Upcoming(now) => date >= *now,
            Self::Past(now) => date < *now,
        }
    }

    /// Whether the listing is ordered newest first.
    pub fn descending(&self) -> bool {
        matches!(self, Self::Past(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_window_split_at_now() {
        let now = Utc::now();
        let tomorrow = now + Duration::days(1);
        let yesterday = now - Duration::days(1);

        assert!(EventWindow::Upcoming(now).contains(tomorrow));
        assert!(EventWindow::Upcoming(now).contains(now));
        assert!(!EventWindow::Upcoming(now).contains(yesterday));
        assert!(EventWindow::Past(now).contains(yesterday));
        assert!(!EventWindow::Past(now).contains(now));
        assert!(EventWindow::All.contains(yesterday));
        assert!(EventWindow::Past(now).descending());
        assert!(!EventWindow::Upcoming(now).descending());
    }
}
