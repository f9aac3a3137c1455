//! Project handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use clubhub_core::types::ProjectId;
use clubhub_entity::project::Project;

use crate::dto::request::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CurrentActor, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = if query.mine {
        state.projects.list_mine(&actor).await?
    } else {
        state.projects.list(&actor).await?
    };
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    actor: CurrentActor,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    let project = state.projects.create(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project))))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<ProjectId>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.projects.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<ProjectId>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.projects.update(&actor, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<ProjectId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.projects.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Project deleted"))))
}
