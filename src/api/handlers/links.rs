//! Handlers for link management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkListResponse, LinkResponse};
use crate::domain::entities::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "identifier": "aZ3kP9qLm",
///   "destination": "https://example.com/very/long/path",
///   "access_count": 0,
///   "created_at": "2026-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL is not an absolute http(s) URL
/// - 403 if the caller account is inactive
/// - 500 if no unique identifier could be generated or the store failed
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create(&payload.url, &caller).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists the authenticated caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<LinkListResponse>, AppError> {
    let items: Vec<LinkResponse> = state
        .link_service
        .list_for_owner(&caller)
        .await?
        .into_iter()
        .map(LinkResponse::from)
        .collect();

    Ok(Json(LinkListResponse {
        total: items.len(),
        items,
    }))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{identifier}`
///
/// Allowed for the link's owner and for administrators. The cached
/// destination is evicted so the identifier stops resolving immediately.
///
/// # Errors
///
/// - 404 if the link does not exist
/// - 403 if the caller is neither owner nor administrator
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(identifier): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&identifier, &caller).await?;

    Ok(StatusCode::NO_CONTENT)
}
