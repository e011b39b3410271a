//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{identifier}`              - Redirect (public)
//! - `GET /health`                    - Store and cache status (public)
//! - `GET /api/resolve/{identifier}`  - Destination as JSON (public)
//! - `/api/links`, `/api/admin/*`     - Bearer token required
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (proxy-aware when configured)
//! - **Authentication** - Bearer token on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit::{self, PUBLIC, SECURE};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   forwarding headers instead of the peer socket address; enable only when
///   the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, behind_proxy))
}

/// Builds the router without path normalization.
pub fn router(state: AppState, behind_proxy: bool) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let protected = rate_limit::apply(protected, SECURE, behind_proxy);

    let public = Router::new()
        .route("/{identifier}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::public_routes());
    let public = rate_limit::apply(public, PUBLIC, behind_proxy);

    Router::new()
        .nest("/api", protected)
        .merge(public)
        .with_state(state)
        .layer(tracing::layer())
}
