//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{AllocationService, RedirectService};
use crate::config::ShortenerSettings;
use crate::domain::clock::Clock;
use crate::domain::repositories::UrlRepository;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Application state cloned into every request.
///
/// Services are behind `Arc`, so cloning is cheap. Both services share the same
/// repository and clock.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService>,
    pub redirect_service: Arc<RedirectService>,
    /// Prefix of every short URL, without trailing slash.
    pub base_url: Arc<str>,
    /// Shared secret for `/api/*`; `None` disables the check.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    /// Wires services over `repository` according to `settings`.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        clock: Arc<dyn Clock>,
        settings: &ShortenerSettings,
    ) -> Self {
        let generator: Arc<dyn CodeGenerator> =
            Arc::new(RandomCodeGenerator::new(settings.code_length));

        let allocation_service = Arc::new(AllocationService::new(
            repository.clone(),
            generator,
            clock.clone(),
            settings.max_allocation_attempts,
        ));
        let redirect_service = Arc::new(RedirectService::new(repository, clock));

        Self {
            allocation_service,
            redirect_service,
            base_url: Arc::from(settings.base_url.trim_end_matches('/')),
            api_key: settings.api_key.as_deref().map(Arc::from),
        }
    }
}
