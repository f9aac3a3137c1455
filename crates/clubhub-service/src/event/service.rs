//! Event scheduling.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use clubhub_auth::rbac::{Action, AuthorizationGate, Resource, Target};
use clubhub_core::error::AppError;
use clubhub_core::types::EventId;
use clubhub_database::store::EventStore;
use clubhub_entity::event::{CreateEvent, Event, EventWindow, UpdateEvent};

use crate::context::RequestContext;
use crate::{optional, required};

/// Which events to list, split at the request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventWhen {
    /// Dated now or later, soonest first.
    Upcoming,
    /// Dated before now, most recent first.
    Past,
    /// Everything, by date.
    #[default]
    All,
}

impl EventWhen {
    /// The store window for a request made at `now`.
    pub fn window(self, now: DateTime<Utc>) -> EventWindow {
        match self {
            Self::Upcoming => EventWindow::Upcoming(now),
            Self::Past => EventWindow::Past(now),
            Self::All => EventWindow::All,
        }
    }
}

impl FromStr for EventWhen {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            "all" => Ok(Self::All),
            _ => Err(AppError::validation(format!(
                "Invalid event filter: '{s}'. Expected one of: upcoming, past, all"
            ))),
        }
    }
}

/// Fields supplied when scheduling an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// When it happens.
    pub date: DateTime<Utc>,
    /// Where it happens.
    pub location: Option<String>,
}

/// Event operations.
#[derive(Debug, Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    gate: Arc<AuthorizationGate>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<dyn EventStore>, gate: Arc<AuthorizationGate>) -> Self {
        Self { events, gate }
    }

    /// Schedule an event. Admins and up.
    pub async fn create(&self, ctx: &RequestContext, req: NewEvent) -> Result<Event, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Event, Action::Create, None)?;

        let data = CreateEvent {
            created_by: identity.member_id,
            title: required("Title", &req.title)?,
            description: required("Description", &req.description)?,
            date: req.date,
            location: optional(req.location.as_deref()),
        };

        let event = self.events.create(&data).await?;
        info!(event_id = %event.id, created_by = %event.created_by, date = %event.date, "Event created");
        Ok(event)
    }

    /// Events in the requested window.
    pub async fn list(&self, ctx: &RequestContext, when: EventWhen) -> Result<Vec<Event>, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Event, Action::List, None)?;
        self.events.list(when.window(ctx.request_time)).await
    }

    /// Events the caller created.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Event>, AppError> {
        let identity = self
            .gate
            .require(&ctx.actor, Resource::Event, Action::List, None)?;
        self.events.list_by_creator(identity.member_id).await
    }

    /// Read one event.
    pub async fn get(&self, ctx: &RequestContext, id: EventId) -> Result<Event, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Event, Action::Read, None)?;
        self.find(id).await
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: EventId,
        req: UpdateEvent,
    ) -> Result<Event, AppError> {
        self.gate
            .require(&ctx.actor, Resource::Event, Action::Edit, None)?;
        let event = self.find(id).await?;
        self.gate.require(
            &ctx.actor,
            Resource::Event,
            Action::Edit,
            Some(&Target::owned_by(event.created_by)),
        )?;

        let data = UpdateEvent {
            title: req.title.map(|t| required("Title", &t)).transpose()?,
            description: req
                .description
                .map(|d| required("Description", &d))
                .transpose()?,
            ..req
        };

        let updated = self.events.update(id, &data).await?;
        info!(event_id = %id, member_id = ?ctx.member_id(), "Event updated");
        Ok(updated)
    }

    /// Delete an event.
    pub async fn delete(&self, ctx: &RequestContext, id: EventId) -> Result<(), AppError> {
        self.gate
            .require(&ctx.actor, Resource::Event, Action::Delete, None)?;
        let event = self.find(id).await?;
        self.gate.require(
            &ctx.actor,
            Resource::Event,
            Action::Delete,
            Some(&Target::owned_by(event.created_by)),
        )?;

        self.events.delete(id).await?;
        info!(event_id = %id, member_id = ?ctx.member_id(), "Event deleted");
        Ok(())
    }

    async fn find(&self, id: EventId) -> Result<Event, AppError> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))
    }
}
