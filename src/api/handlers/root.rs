//! Handler for the service banner.

use axum::Json;

use crate::api::dto::health::RootResponse;

/// Returns the service name and version.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "URL Shortener API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
