//! Redirect resolution and usage statistics service.

use std::sync::Arc;

use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{UrlRepository, clamp_page};
use crate::error::AppError;

/// Service for resolving short codes and reading usage statistics.
///
/// Resolution is gatekept (inactive or expired records do not resolve) while
/// statistics expose every allocated record. Expiration is evaluated against
/// the clock on every call.
pub struct RedirectService<R: ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: UrlRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Resolves a short code to its target URL.
    ///
    /// Returns `Ok(None)` if the code is unknown, inactive, or expired. Does not
    /// touch the access counter; see [`Self::record_access`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        let Some(record) = self.repository.find_by_code(code).await? else {
            return Ok(None);
        };

        if !record.is_resolvable_at(self.clock.now()) {
            debug!(code, is_active = record.is_active, "Short code not resolvable");
            return Ok(None);
        }

        Ok(Some(record.original_url))
    }

    /// Adds one to the access counter of `code`.
    ///
    /// Unknown codes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn record_access(&self, code: &str) -> Result<(), AppError> {
        if self
            .repository
            .increment_access_count(code)
            .await?
            .is_none()
        {
            debug!(code, "Access not recorded, short code vanished");
        }

        Ok(())
    }

    /// Returns the full record for `code`, including inactive and expired ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn stats(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.repository.find_by_code(code).await
    }

    /// Lists records in creation order.
    ///
    /// `limit` is capped at [`crate::domain::repositories::MAX_LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let (offset, limit) = clamp_page(skip, limit);
        self.repository.list(offset, limit).await
    }

    /// Verifies the backing store is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
