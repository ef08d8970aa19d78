//! Short URL allocation service.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_custom_code};
use crate::utils::url_validator::validate_original_url;

/// Default number of generated codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Input for [`AllocationService::allocate`].
#[derive(Debug, Clone, Default)]
pub struct AllocationRequest {
    pub original_url: String,
    pub expires_in_days: Option<i64>,
    pub custom_code: Option<String>,
    pub created_by: Option<String>,
}

/// Service for creating short URLs.
///
/// Uniqueness is decided by the store's insert, never by a lookup beforehand:
/// a duplicate on a generated code triggers a new code, a duplicate on a custom
/// code is reported to the caller.
pub struct AllocationService<R: ?Sized = dyn UrlRepository, G: ?Sized = dyn CodeGenerator> {
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl<R, G> AllocationService<R, G>
where
    R: UrlRepository + ?Sized,
    G: CodeGenerator + ?Sized,
{
    /// Creates a new allocation service.
    ///
    /// `max_attempts` is the retry budget for generated codes and is raised to
    /// at least 1.
    pub fn new(
        repository: Arc<R>,
        generator: Arc<G>,
        clock: Arc<dyn Clock>,
        max_attempts: u32,
    ) -> Self {
        Self {
            repository,
            generator,
            clock,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Allocates a short code for `request.original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - the URL does not start with `http://` or `https://`
    /// - `expires_in_days` is negative or out of range
    /// - the custom code breaks the custom code rules
    ///
    /// Returns [`AppError::CodeInUse`] if the custom code is already allocated.
    /// Returns [`AppError::AllocationExhausted`] if every generated code collided.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn allocate(&self, request: AllocationRequest) -> Result<UrlRecord, AppError> {
        validate_original_url(&request.original_url)?;

        if let Some(code) = &request.custom_code {
            validate_custom_code(code)?;
        }

        let created_at = self.clock.now();
        let expires_at = match request.expires_in_days {
            Some(days) => Some(expiry_after(created_at, days)?),
            None => None,
        };

        let AllocationRequest {
            original_url,
            custom_code,
            created_by,
            ..
        } = request;

        let template = NewUrlRecord {
            original_url,
            short_code: String::new(),
            created_at,
            expires_at,
            created_by,
        };

        match custom_code {
            Some(code) => self.insert_custom(template, code).await,
            None => self.insert_generated(template).await,
        }
    }

    /// Single insert attempt with a caller-chosen code.
    async fn insert_custom(
        &self,
        template: NewUrlRecord,
        code: String,
    ) -> Result<UrlRecord, AppError> {
        let new_record = NewUrlRecord {
            short_code: code.clone(),
            ..template
        };

        match self.repository.insert(new_record).await {
            Ok(record) => {
                info!(code = %record.short_code, "Allocated custom short code");
                Ok(record)
            }
            Err(e) if e.is_duplicate_code() => Err(AppError::code_in_use(
                format!("Custom code '{}' is already in use", code),
                json!({ "code": code }),
            )),
            Err(e) => Err(e),
        }
    }

    /// Generates and inserts codes until one sticks or the budget runs out.
    async fn insert_generated(&self, template: NewUrlRecord) -> Result<UrlRecord, AppError> {
        for attempt in 1..=self.max_attempts {
            let new_record = NewUrlRecord {
                short_code: self.generator.generate(),
                ..template.clone()
            };

            match self.repository.insert(new_record).await {
                Ok(record) => {
                    info!(code = %record.short_code, attempt, "Allocated short code");
                    return Ok(record);
                }
                Err(e) if e.is_duplicate_code() => {
                    debug!(attempt, "Generated short code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Failed to allocate a unique short code"
        );

        Err(AppError::allocation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}

/// Computes `now + days`, rejecting negative or unrepresentable values.
fn expiry_after(
    now: chrono::DateTime<chrono::Utc>,
    days: i64,
) -> Result<chrono::DateTime<chrono::Utc>, AppError> {
    if days < 0 {
        return Err(AppError::bad_request(
            "expires_in_days must be greater than or equal to 0",
            json!({ "expires_in_days": days }),
        ));
    }

    Duration::try_days(days)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| {
            AppError::bad_request(
                "expires_in_days is too large",
                json!({ "expires_in_days": days }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::persistence::InMemoryUrlRepository;
    use crate::utils::code_generator::{MockCodeGenerator, RandomCodeGenerator};
    use chrono::{TimeZone, Utc};
    use mockall::Sequence;

    fn fixed_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn request(url: &str) -> AllocationRequest {
        AllocationRequest {
            original_url: url.to_string(),
            ..Default::default()
        }
    }

    fn duplicate() -> AppError {
        AppError::conflict("Short code already exists", json!({}))
    }

    #[tokio::test]
    async fn test_allocate_generated_code_success() {
        let mut repo = MockUrlRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(1)
            .returning(|| "aB3xY9".to_string());
        repo.expect_insert()
            .withf(|r| r.short_code == "aB3xY9" && r.original_url == "https://example.com")
            .times(1)
            .returning(|r| Ok(r.into_record(1)));

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(generator),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let record = service.allocate(request("https://example.com")).await.unwrap();

        assert_eq!(record.short_code, "aB3xY9");
        assert_eq!(record.access_count, 0);
        assert!(record.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_allocate_retries_on_collision_with_new_code() {
        let mut repo = MockUrlRepository::new();
        let mut generator = MockCodeGenerator::new();
        let mut seq = Sequence::new();

        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "taken1".to_string());
        repo.expect_insert()
            .withf(|r| r.short_code == "taken1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(duplicate()));
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "fresh2".to_string());
        repo.expect_insert()
            .withf(|r| r.short_code == "fresh2")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Ok(r.into_record(7)));

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(generator),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let record = service.allocate(request("https://example.com")).await.unwrap();
        assert_eq!(record.short_code, "fresh2");
        assert_eq!(record.id, 7);
    }

    #[tokio::test]
    async fn test_allocate_exhausts_retry_budget() {
        let mut repo = MockUrlRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(3)
            .returning(|| "always".to_string());
        repo.expect_insert()
            .times(3)
            .returning(|_| Err(duplicate()));

        let service =
            AllocationService::new(Arc::new(repo), Arc::new(generator), fixed_clock(), 3);

        let err = service
            .allocate(request("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AllocationExhausted { .. }));
    }

    #[tokio::test]
    async fn test_allocate_propagates_storage_error_without_retry() {
        let mut repo = MockUrlRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(1)
            .returning(|| "abc123".to_string());
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(generator),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let err = service
            .allocate(request("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_success() {
        let mut repo = MockUrlRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(0);
        repo.expect_insert()
            .withf(|r| r.short_code == "promo")
            .times(1)
            .returning(|r| Ok(r.into_record(3)));

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(generator),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let record = service
            .allocate(AllocationRequest {
                custom_code: Some("promo".to_string()),
                created_by: Some("marketing".to_string()),
                ..request("https://example.com")
            })
            .await
            .unwrap();

        assert_eq!(record.short_code, "promo");
        assert_eq!(record.created_by.as_deref(), Some("marketing"));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_in_use_is_not_retried() {
        let mut repo = MockUrlRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(0);
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(duplicate()));

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(generator),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let err = service
            .allocate(AllocationRequest {
                custom_code: Some("taken".to_string()),
                ..request("https://example.com")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CodeInUse { .. }));
        assert!(err.to_string().contains("taken"));
    }

    #[tokio::test]
    async fn test_allocate_rejects_invalid_url_before_storage() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().times(0);

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(MockCodeGenerator::new()),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let err = service.allocate(request("not-a-url")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_allocate_rejects_bad_custom_code_length() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().times(0);

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(MockCodeGenerator::new()),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        for code in ["ab", "abcdefghijklmnopqrstu"] {
            let err = service
                .allocate(AllocationRequest {
                    custom_code: Some(code.to_string()),
                    ..request("https://example.com")
                })
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }));
        }
    }

    #[tokio::test]
    async fn test_allocate_rejects_negative_expiry() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().times(0);

        let service = AllocationService::new(
            Arc::new(repo),
            Arc::new(MockCodeGenerator::new()),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let err = service
            .allocate(AllocationRequest {
                expires_in_days: Some(-1),
                ..request("https://example.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service
            .allocate(AllocationRequest {
                expires_in_days: Some(i64::MAX),
                ..request("https://example.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_allocate_computes_expiry_from_clock() {
        let clock = fixed_clock();
        let now = clock.now();
        let service = AllocationService::new(
            Arc::new(InMemoryUrlRepository::new()),
            Arc::new(RandomCodeGenerator::default()),
            clock,
            DEFAULT_MAX_ATTEMPTS,
        );

        let record = service
            .allocate(AllocationRequest {
                expires_in_days: Some(1),
                ..request("https://example.com")
            })
            .await
            .unwrap();

        assert_eq!(record.created_at, now);
        assert_eq!(record.expires_at, Some(now + Duration::days(1)));
        assert_eq!(record.short_code.len(), 6);
    }

    #[tokio::test]
    async fn test_allocate_zero_days_expires_immediately() {
        let clock = fixed_clock();
        let now = clock.now();
        let service = AllocationService::new(
            Arc::new(InMemoryUrlRepository::new()),
            Arc::new(RandomCodeGenerator::default()),
            clock,
            DEFAULT_MAX_ATTEMPTS,
        );

        let record = service
            .allocate(AllocationRequest {
                expires_in_days: Some(0),
                ..request("https://example.com")
            })
            .await
            .unwrap();

        assert_eq!(record.expires_at, Some(now));
        assert!(!record.is_resolvable_at(now));
    }

    #[tokio::test]
    async fn test_competing_allocations_of_same_generated_code() {
        let repo = Arc::new(InMemoryUrlRepository::new());

        let mut first_gen = MockCodeGenerator::new();
        first_gen
            .expect_generate()
            .times(1)
            .returning(|| "same01".to_string());
        let first = AllocationService::new(
            repo.clone(),
            Arc::new(first_gen),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let mut second_gen = MockCodeGenerator::new();
        let mut seq = Sequence::new();
        second_gen
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "same01".to_string());
        second_gen
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "other2".to_string());
        let second = AllocationService::new(
            repo.clone(),
            Arc::new(second_gen),
            fixed_clock(),
            DEFAULT_MAX_ATTEMPTS,
        );

        let a = first.allocate(request("https://a.com")).await.unwrap();
        let b = second.allocate(request("https://b.com")).await.unwrap();

        assert_eq!(a.short_code, "same01");
        assert_eq!(b.short_code, "other2");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[test]
    fn test_max_attempts_floor() {
        let service = AllocationService::new(
            Arc::new(MockUrlRepository::new()),
            Arc::new(MockCodeGenerator::new()),
            fixed_clock(),
            0,
        );
        assert_eq!(service.max_attempts(), 1);
    }
}
