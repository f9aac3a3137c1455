//! Event handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use clubhub_core::types::EventId;
use clubhub_entity::event::Event;

use crate::dto::request::{CreateEventRequest, EventListQuery, UpdateEventRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CurrentActor, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(query): Query<EventListQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let events = if query.mine {
        state.events.list_mine(&actor).await?
    } else {
        state.events.list(&actor, query.when).await?
    };
    Ok(Json(ApiResponse::ok(events)))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    actor: CurrentActor,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    let event = state.events.create(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<EventId>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state.events.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<EventId>,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state.events.update(&actor, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<EventId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.events.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Event deleted"))))
}
