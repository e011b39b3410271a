//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Resolves the bearer token to a caller and attaches it to the request.
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the request continues with a
/// [`crate::domain::entities::CallerIdentity`] in its extensions, which
/// handlers take via `Extension<CallerIdentity>`. Inactive callers pass this
/// layer; operations that need an active account reject them with 403.
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the token is unknown or revoked.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    match authenticate(&st, req).await {
        Ok(req) => next.run(req).await,
        Err(e) => {
            let unauthorized = matches!(e, AppError::Unauthorized { .. });
            let mut response = e.into_response();
            if unauthorized {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            }
            response
        }
    }
}

async fn authenticate(st: &AppState, req: Request) -> Result<Request, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let caller = st.auth_service.authenticate(&token).await?;
    tracing::debug!(caller_id = caller.id, "Caller authenticated");

    parts.extensions.insert(caller);

    Ok(Request::from_parts(parts, body))
}
