//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an identifier to its destination.
///
/// # Endpoint
///
/// `GET /{identifier}`
///
/// Each successful redirect counts one access. The cache is consulted first;
/// when it is unavailable the store answers instead.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier does not exist.
/// Returns 500 Internal Server Error if the store is unavailable.
pub async fn redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let destination = state
        .resolution_service
        .resolve(&identifier)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "identifier": identifier }))
        })?;

    Ok(Redirect::temporary(&destination))
}
