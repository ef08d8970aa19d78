//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`           - Service banner (public)
//! - `GET  /health`     - Storage health check (public)
//! - `GET  /{code}`     - Short code resolution (public)
//! - `/api/*`           - Management API (`X-API-Key` when configured)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origin policy
//! - **Authentication** - API key on `/api/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, root_handler};
use crate::api::middleware::{auth, cors, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes and middleware without path normalization.
///
/// `cors_allowed_origins` is `*` or a comma-separated origin list.
pub fn router(state: AppState, cors_allowed_origins: &str) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed before
/// routing.
pub fn app_router(state: AppState, cors_allowed_origins: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_allowed_origins))
}
