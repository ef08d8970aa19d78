//! Process-local implementation of the URL repository.
//!
//! Used when no database is configured and by the HTTP integration tests. Data
//! lives only as long as the process.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{UrlRepository, clamp_page};
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    /// Records in insertion (and therefore `id`) order.
    records: Vec<UrlRecord>,
    /// Unique index: short code → position in `records`.
    by_code: HashMap<String, usize>,
}

impl Store {
    fn get_mut(&mut self, code: &str) -> Option<&mut UrlRecord> {
        let idx = *self.by_code.get(code)?;
        self.records.get_mut(idx)
    }
}

/// In-memory URL repository.
///
/// Every operation runs under one short-lived lock, so the uniqueness check and
/// the insert, or the counter read and write, can never interleave with another
/// request.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    store: Mutex<Store>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::internal("In-memory store lock poisoned", json!({})))
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut store = self.lock()?;

        if store.by_code.contains_key(&new_record.short_code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_record.short_code }),
            ));
        }

        store.next_id += 1;
        let record = new_record.into_record(store.next_id);
        let idx = store.records.len();
        store.by_code.insert(record.short_code.clone(), idx);
        store.records.push(record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let store = self.lock()?;
        Ok(store
            .by_code
            .get(code)
            .and_then(|&idx| store.records.get(idx))
            .cloned())
    }

    async fn increment_access_count(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let mut store = self.lock()?;
        Ok(store.get_mut(code).map(|record| {
            record.access_count += 1;
            record.clone()
        }))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let (offset, limit) = clamp_page(offset, limit);
        let store = self.lock()?;
        Ok(store
            .records
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let store = self.lock()?;
        Ok(store.records.len() as i64)
    }

    async fn set_active(
        &self,
        code: &str,
        is_active: bool,
    ) -> Result<Option<UrlRecord>, AppError> {
        let mut store = self.lock()?;
        Ok(store.get_mut(code).map(|record| {
            record.is_active = is_active;
            record.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
