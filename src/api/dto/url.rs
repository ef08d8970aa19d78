//! Response DTOs describing URL records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// A short URL as returned by create and list endpoints.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub access_count: i64,
}

impl UrlResponse {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let short_url = record.short_url(base_url);
        Self {
            original_url: record.original_url,
            short_code: record.short_code,
            short_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            is_active: record.is_active,
            access_count: record.access_count,
        }
    }
}

/// Full usage statistics of a short URL.
#[derive(Debug, Serialize)]
pub struct UrlStats {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub access_count: i64,
    pub created_by: Option<String>,
}

impl UrlStats {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let short_url = record.short_url(base_url);
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            short_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            is_active: record.is_active,
            access_count: record.access_count,
            created_by: record.created_by,
        }
    }
}

/// Body of a successful `GET /{code}`.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub url: String,
}
