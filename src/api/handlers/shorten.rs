//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::ShortenRequest;
use crate::api::dto::url::UrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "expires_in_days": 1,       // optional
///   "custom_code": "my-link",   // optional
///   "created_by": "alice"       // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored record:
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "short_code": "aZ3k9Q",
///   "short_url": "http://localhost:8000/aZ3k9Q",
///   "created_at": "2025-01-01T00:00:00Z",
///   "expires_at": "2025-01-02T00:00:00Z",
///   "is_active": true,
///   "access_count": 0
/// }
/// ```
///
/// # Errors
///
/// - **400** `validation_error` for a malformed URL, negative expiry or bad custom code
/// - **400** `code_in_use` if the custom code is taken
/// - **500** `allocation_exhausted` if no free generated code was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let record = state.allocation_service.allocate(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_record(record, &state.base_url)),
    ))
}
