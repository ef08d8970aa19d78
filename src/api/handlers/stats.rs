//! Handler for per-code usage statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::url::UrlStats;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record for a short code.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Inactive and expired records are still reported.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never allocated.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UrlStats>, AppError> {
    let record = state
        .redirect_service
        .stats(&code)
        .await?
        .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))?;

    Ok(Json(UrlStats::from_record(record, &state.base_url)))
}
