//! Shared-secret API key middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Requires the configured API key on every request it wraps.
///
/// # Header Format
///
/// ```text
/// X-API-Key: <key>
/// ```
///
/// When no key is configured, every request passes through.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: ApiKey` if the header is
/// missing or does not match.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/api/list", get(list_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = st.api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    let outcome = match req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        None => Err("API key is required"),
        Some(provided) if provided == expected => Ok(()),
        Some(_) => Err("Invalid API key"),
    };

    if let Err(reason) = outcome {
        tracing::debug!(path = %req.uri().path(), reason, "Rejected API request");
        return Err(AppError::unauthorized(
            reason,
            json!({ "header": "X-API-Key" }),
        ));
    }

    Ok(next.run(req).await)
}
