//! API route configuration.
//!
//! Every endpoint here sits behind the API key check in
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{list_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Allocate a short code
/// - `GET  /stats/{code}`  - Statistics for one code
/// - `GET  /list`          - Paginated listing
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/list", get(list_handler))
}
