//! Invitation handlers: super-admin management and public redemption.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use clubhub_core::types::InvitationId;

use crate::dto::request::{CreateInvitationRequest, RedeemInvitationRequest};
use crate::dto::response::{
    ApiResponse, InvitationResponse, IssuedInvitationResponse, MemberResponse, MessageResponse,
};
use crate::error::ApiError;
use crate::extractors::{CurrentActor, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<ApiResponse<Vec<InvitationResponse>>>, ApiError> {
    let now = actor.request_time;
    let invitations = state
        .invitations
        .list(&actor)
        .await?
        .into_iter()
        .map(|invitation| InvitationResponse::at(invitation, now))
        .collect();
    Ok(Json(ApiResponse::ok(invitations)))
}

/// POST /api/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    actor: CurrentActor,
    ValidatedJson(req): ValidatedJson<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IssuedInvitationResponse>>), ApiError> {
    let issued = state.invitations.create(&actor, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(IssuedInvitationResponse {
            invitation: InvitationResponse::at(issued.invitation, actor.request_time),
            token: issued.token,
        })),
    ))
}

/// DELETE /api/invitations/{id}
pub async fn delete_invitation(
    State(state): State<AppState>,
    actor: CurrentActor,
    IdPath(id): IdPath<InvitationId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.invitations.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Invitation deleted"))))
}

/// Query of the pre-redemption check.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// Plain invitation token.
    pub token: String,
}

/// GET /invitations/redeem?token=
///
/// Lets the join form show who the invitation is for before asking for a
/// password.
pub async fn check_invitation(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(query): Query<TokenQuery>,
) -> Result<Json<ApiResponse<InvitationResponse>>, ApiError> {
    let invitation = state.invitations.lookup(&actor, &query.token).await?;
    Ok(Json(ApiResponse::ok(InvitationResponse::at(
        invitation,
        actor.request_time,
    ))))
}

/// POST /invitations/redeem
pub async fn redeem_invitation(
    State(state): State<AppState>,
    actor: CurrentActor,
    ValidatedJson(req): ValidatedJson<RedeemInvitationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MemberResponse>>), ApiError> {
    let (member, profile) = state.invitations.redeem(&actor, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MemberResponse {
            member,
            profile: Some(profile),
        })),
    ))
}
