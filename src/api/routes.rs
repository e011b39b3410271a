//! API route configuration.

use crate::api::handlers::{
    admin_stats_handler, create_link_handler, delete_link_handler, list_links_handler,
    resolve_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Routes reachable without credentials.
///
/// - `GET /api/resolve/{identifier}` - Destination lookup as JSON
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/resolve/{identifier}", get(resolve_handler))
}

/// Routes requiring Bearer token authentication, nested under `/api`.
///
/// - `POST   /links`              - Create a link
/// - `GET    /links`              - List the caller's links
/// - `DELETE /links/{identifier}` - Delete a link (owner or admin)
/// - `GET    /admin/stats`        - Statistics for every link (admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{identifier}", delete(delete_link_handler))
        .route("/admin/stats", get(admin_stats_handler))
}
