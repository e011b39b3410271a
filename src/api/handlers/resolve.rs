//! Handler for resolving an identifier without redirecting.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::resolve::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the destination for an identifier as JSON.
///
/// # Endpoint
///
/// `GET /api/resolve/{identifier}`
///
/// Counts as an access, exactly like following the redirect.
///
/// # Response
///
/// ```json
/// { "destination": "https://example.com/page" }
/// ```
pub async fn resolve_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let destination = state
        .resolution_service
        .resolve(&identifier)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "identifier": identifier }))
        })?;

    Ok(Json(ResolveResponse { destination }))
}
