#![allow(dead_code)]

use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use url_shortener_api::config::ShortenerSettings;
use url_shortener_api::domain::clock::{Clock, ManualClock};
use url_shortener_api::domain::entities::{NewUrlRecord, UrlRecord};
use url_shortener_api::domain::repositories::UrlRepository;
use url_shortener_api::infrastructure::persistence::InMemoryUrlRepository;
use url_shortener_api::routes;
use url_shortener_api::state::AppState;

pub const BASE_URL: &str = "http://localhost:8000";
pub const API_KEY: &str = "test-secret";

/// Handles a test keeps next to the state it hands to the router.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<InMemoryUrlRepository>,
    pub clock: ManualClock,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn create_test_state_with(settings: ShortenerSettings) -> TestContext {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let clock = ManualClock::new(start_time());

    let repository: Arc<dyn UrlRepository> = repo.clone();
    let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
    let state = AppState::new(repository, shared_clock, &settings);

    TestContext { state, repo, clock }
}

/// State over an empty in-memory store with no API key.
pub fn create_test_state() -> TestContext {
    create_test_state_with(ShortenerSettings::default())
}

/// State that requires [`API_KEY`] on `/api/*`.
pub fn create_protected_state() -> TestContext {
    create_test_state_with(ShortenerSettings {
        api_key: Some(API_KEY.to_string()),
        ..ShortenerSettings::default()
    })
}

/// The full application router with permissive CORS.
pub fn full_router(state: AppState) -> Router {
    routes::router(state, "*")
}

pub async fn create_test_url(
    repo: &InMemoryUrlRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> UrlRecord {
    repo.insert(NewUrlRecord {
        original_url: url.to_string(),
        short_code: code.to_string(),
        created_at: start_time(),
        expires_at,
        created_by: None,
    })
    .await
    .unwrap()
}
