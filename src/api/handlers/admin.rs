//! Handler for administrator statistics.

use axum::{Extension, Json, extract::State};

use crate::api::dto::stats::AdminStatsResponse;
use crate::domain::entities::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every link with its access count and creator.
///
/// # Endpoint
///
/// `GET /api/admin/stats`
///
/// # Errors
///
/// Returns 403 Forbidden unless the caller is an administrator.
pub async fn admin_stats_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<AdminStatsResponse>, AppError> {
    let rows = state.link_service.list_all(&caller).await?;

    Ok(Json(AdminStatsResponse::from_rows(rows)))
}
