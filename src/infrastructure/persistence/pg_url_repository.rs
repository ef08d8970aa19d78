//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{UrlRepository, clamp_page};
use crate::error::AppError;

const RECORD_COLUMNS: &str =
    "id, original_url, short_code, created_at, expires_at, is_active, access_count, created_by";

/// Row shape of the `urls` table.
#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    access_count: i64,
    created_by: Option<String>,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord {
            id: r.id,
            original_url: r.original_url,
            short_code: r.short_code,
            created_at: r.created_at,
            expires_at: r.expires_at,
            is_active: r.is_active,
            access_count: r.access_count,
            created_by: r.created_by,
        }
    }
}

/// PostgreSQL repository for URL records.
///
/// Short-code uniqueness is enforced by the `urls_short_code_key` constraint and
/// access counts are incremented in place with a single `UPDATE`.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO urls (original_url, short_code, created_at, expires_at, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(new_record.original_url)
            .bind(new_record.short_code)
            .bind(new_record.created_at)
            .bind(new_record.expires_at)
            .bind(new_record.created_by)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM urls WHERE short_code = $1");

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn increment_access_count(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!(
            r#"
            UPDATE urls
            SET access_count = access_count + 1
            WHERE short_code = $1
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let (offset, limit) = clamp_page(offset, limit);
        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM urls
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#
        );

        let rows = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn set_active(
        &self,
        code: &str,
        is_active: bool,
    ) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!(
            r#"
            UPDATE urls
            SET is_active = $2
            WHERE short_code = $1
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(code)
            .bind(is_active)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
