//! Event repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::{EventId, MemberId};
use clubhub_entity::event::{CreateEvent, Event, EventWindow, UpdateEvent};

use crate::store::EventStore;

/// Repository for event CRUD and time-window listings.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, created_by, title, description, date, location) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(EventId::new())
        .bind(data.created_by)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    async fn list(&self, window: EventWindow) -> AppResult<Vec<Event>> {
        let query = match window {
            EventWindow::All => sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date ASC"),
            EventWindow::Upcoming(now) => sqlx::query_as::<_, Event>(
                "SELECT * FROM events WHERE date >= $1 ORDER BY date ASC",
            )
            .bind(now),
            EventWindow::Past(now) => sqlx::query_as::<_, Event>(
                "SELECT * FROM events WHERE date < $1 ORDER BY date DESC",
            )
            .bind(now),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    async fn list_by_creator(&self, member_id: MemberId) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE created_by = $1 ORDER BY date ASC")
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list member events", e)
            })
    }

    async fn update(&self, id: EventId, data: &UpdateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = COALESCE($2, title), \
                               description = COALESCE($3, description), \
                               date = COALESCE($4, date), \
                               location = COALESCE($5, location), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))
    }

    async fn delete(&self, id: EventId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Event {id} not found")));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))
    }
}
