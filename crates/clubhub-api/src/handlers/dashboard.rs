//! Dashboard handler.

use axum::Json;
use axum::extract::State;

use clubhub_service::dashboard::DashboardOverview;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CurrentActor;
use crate::state::AppState;

/// GET /dashboard
pub async fn overview(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<ApiResponse<DashboardOverview>>, ApiError> {
    let overview = state.dashboard.overview(&actor).await?;
    Ok(Json(ApiResponse::ok(overview)))
}
