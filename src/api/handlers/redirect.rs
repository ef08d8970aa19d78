//! Handler for short code resolution.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::warn;

use crate::api::dto::url::RedirectResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its original URL and counts the access.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (unknown, inactive and expired codes do not resolve)
/// 2. Increment the access counter
/// 3. Return `{"url": "<original_url>"}`
///
/// A failed counter update is logged and does not fail the request.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown, inactive or expired.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<RedirectResponse>, AppError> {
    let url = state.redirect_service.resolve(&code).await?.ok_or_else(|| {
        AppError::not_found(
            format!("URL with code {} not found or expired", code),
            json!({ "code": code }),
        )
    })?;

    if let Err(e) = state.redirect_service.record_access(&code).await {
        warn!(code = %code, error = %e, "Failed to record access");
    }

    Ok(Json(RedirectResponse { url }))
}
