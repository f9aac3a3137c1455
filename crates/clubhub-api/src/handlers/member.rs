//! Own-profile and member administration handlers.

use axum::Json;
use axum::extract::State;

use clubhub_core::types::MemberId;
use clubhub_entity::member::{Member, Profile};
use clubhub_service::member::MemberView;

use crate::dto::request::{ChangeRoleRequest, UpdateProfileRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CurrentActor, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<ApiResponse<MemberView>>, ApiError> {
    let view = state.members.me(&actor).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/me/profile
pub async fn update_my_profile(
    State(state): State<AppState>,
    actor: CurrentActor,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let id = actor.identity()?.member_id;
    let profile = state.members.update_profile(&actor, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<ApiResponse<Vec<Member>>>, ApiError> {
    let members = state.admin_members.list(&actor).await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// GET /api/members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<MemberId>,
) -> Result<Json<ApiResponse<MemberView>>, ApiError> {
    let view = state.members.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/members/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<MemberId>,
    ValidatedJson(req): ValidatedJson<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    let member = state.admin_members.change_role(&actor, id, req.role).await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// DELETE /api/members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<MemberId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.admin_members.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member deleted"))))
}
