//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Upper bound on the number of records returned by one [`UrlRepository::list`] call.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamps caller-supplied pagination to `offset >= 0` and `1..=MAX_LIST_LIMIT`.
pub fn clamp_page(offset: i64, limit: i64) -> (i64, i64) {
    (offset.max(0), limit.clamp(1, MAX_LIST_LIMIT))
}

/// Storage contract for URL records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns it with its assigned `id`.
    ///
    /// Uniqueness of `short_code` is decided by the store at insert time, never by
    /// a prior lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short code, regardless of active or expired state.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically adds one to `access_count`.
    ///
    /// Returns the updated record, or `Ok(None)` if the code does not exist.
    async fn increment_access_count(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Lists records in creation order.
    ///
    /// `offset` and `limit` are clamped with [`clamp_page`].
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlRecord>, AppError>;

    /// Counts all records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sets the soft-disable flag. Returns `Ok(None)` if the code does not exist.
    async fn set_active(&self, code: &str, is_active: bool)
    -> Result<Option<UrlRecord>, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
