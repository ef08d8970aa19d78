//! URL record entity representing a short code to target URL mapping.

use chrono::{DateTime, Utc};

/// A persisted short URL mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub access_count: i64,
    pub created_by: Option<String>,
}

impl UrlRecord {
    /// Returns true if the record has an expiry that is not in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Returns true if the record may be used for a redirect at `now`.
    ///
    /// A record resolves only while it is active and unexpired.
    pub fn is_resolvable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Full short URL under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_code)
    }
}

/// Input data for inserting a new record.
///
/// `is_active` and `access_count` always start at `true` and `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
}

impl NewUrlRecord {
    /// Materializes the record the store will hold once `id` is assigned.
    pub fn into_record(self, id: i64) -> UrlRecord {
        UrlRecord {
            id,
            original_url: self.original_url,
            short_code: self.short_code,
            created_at: self.created_at,
            expires_at: self.expires_at,
            is_active: true,
            access_count: 0,
            created_by: self.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: Option<DateTime<Utc>>, is_active: bool) -> UrlRecord {
        UrlRecord {
            id: 1,
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            created_at: Utc::now(),
            expires_at,
            is_active,
            access_count: 0,
            created_by: None,
        }
    }

    #[test]
    fn test_never_expiring_record_resolves() {
        let now = Utc::now();
        let r = record(None, true);
        assert!(!r.is_expired_at(now));
        assert!(r.is_resolvable_at(now));
    }

    #[test]
    fn test_expired_record_does_not_resolve() {
        let now = Utc::now();
        let r = record(Some(now - Duration::seconds(1)), true);
        assert!(r.is_expired_at(now));
        assert!(!r.is_resolvable_at(now));
    }

    #[test]
    fn test_expiry_instant_counts_as_expired() {
        let now = Utc::now();
        let r = record(Some(now), true);
        assert!(!r.is_resolvable_at(now));
    }

    #[test]
    fn test_future_expiry_resolves() {
        let now = Utc::now();
        let r = record(Some(now + Duration::days(1)), true);
        assert!(r.is_resolvable_at(now));
    }

    #[test]
    fn test_inactive_record_does_not_resolve() {
        let now = Utc::now();
        let r = record(None, false);
        assert!(!r.is_resolvable_at(now));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let r = record(None, true);
        assert_eq!(r.short_url("http://sho.rt/"), "http://sho.rt/abc123");
        assert_eq!(r.short_url("http://sho.rt"), "http://sho.rt/abc123");
    }

    #[test]
    fn test_new_record_defaults() {
        let created_at = Utc::now();
        let new_record = NewUrlRecord {
            original_url: "https://rust-lang.org".to_string(),
            short_code: "xyz789".to_string(),
            created_at,
            expires_at: None,
            created_by: Some("ci".to_string()),
        };

        let r = new_record.into_record(42);
        assert_eq!(r.id, 42);
        assert!(r.is_active);
        assert_eq!(r.access_count, 0);
        assert_eq!(r.created_at, created_at);
        assert_eq!(r.created_by.as_deref(), Some("ci"));
    }
}
