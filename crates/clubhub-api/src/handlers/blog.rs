//! Blog and moderation handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use clubhub_core::types::BlogId;
use clubhub_entity::blog::Blog;

use crate::dto::request::{
    BlogListQuery, CreateBlogRequest, ModerateBlogRequest, UpdateBlogRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CurrentActor, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/blogs
pub async fn list_blogs(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, ApiError> {
    let blogs = if query.mine {
        state.blogs.list_mine(&actor, query.status).await?
    } else {
        state.blogs.list(&actor, query.status).await?
    };
    Ok(Json(ApiResponse::ok(blogs)))
}

/// GET /api/blogs/pending
pub async fn pending_blogs(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<ApiResponse<Vec<Blog>>>, ApiError> {
    let blogs = state.moderation.pending(&actor).await?;
    Ok(Json(ApiResponse::ok(blogs)))
}

/// POST /api/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    actor: CurrentActor,
    ValidatedJson(req): ValidatedJson<CreateBlogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Blog>>), ApiError> {
    let blog = state.blogs.create(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(blog))))
}

/// GET /api/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<BlogId>,
) -> Result<Json<ApiResponse<Blog>>, ApiError> {
    let blog = state.blogs.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

/// PUT /api/blogs/{id}
///
/// A successful edit puts the blog back into the moderation queue.
pub async fn update_blog(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<BlogId>,
    ValidatedJson(req): ValidatedJson<UpdateBlogRequest>,
) -> Result<Json<ApiResponse<Blog>>, ApiError> {
    let blog = state.blogs.update(&actor, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<BlogId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.blogs.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Blog deleted"))))
}

/// POST /api/blogs/{id}/moderate
pub async fn moderate_blog(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<BlogId>,
    ValidatedJson(req): ValidatedJson<ModerateBlogRequest>,
) -> Result<Json<ApiResponse<Blog>>, ApiError> {
    let blog = state.moderation.moderate(&actor, id, req.status).await?;
    Ok(Json(ApiResponse::ok(blog)))
}
