//! Handler for listing stored URLs.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::pagination::ListParams;
use crate::api::dto::url::UrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists stored URLs in creation order.
///
/// # Endpoint
///
/// `GET /api/list?skip=0&limit=100`
///
/// # Query Parameters
///
/// - `skip` (optional): Records to skip (default: 0, min: 0)
/// - `limit` (optional): Page size (default: 100, range: 1..=100)
///
/// # Errors
///
/// Returns 400 Bad Request if `skip` or `limit` is out of range.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let (skip, limit) = params
        .validate_and_get_skip_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let records = state.redirect_service.list(skip, limit).await?;

    Ok(Json(
        records
            .into_iter()
            .map(|r| UrlResponse::from_record(r, &state.base_url))
            .collect(),
    ))
}
