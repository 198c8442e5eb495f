//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::db_error::{SHORT_KEY_CONSTRAINT, is_unique_violation_on_short_key};

const COLUMNS: &str = "id, short_key, original_url, hits, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    short_key: String,
    original_url: String,
    hits: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(r: ShortUrlRow) -> Self {
        ShortUrl::new(
            r.id,
            r.short_key,
            r.original_url,
            r.hits,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository backed by the `short_urls` table.
///
/// Key uniqueness is enforced by the `short_urls_short_key_key` constraint; a
/// violation surfaces as [`AppError::Conflict`].
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let query = format!(
            "INSERT INTO short_urls (short_key, original_url) VALUES ($1, $2) RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, ShortUrlRow>(&query)
            .bind(&new_short_url.short_key)
            .bind(&new_short_url.original_url)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_short_key(&e) {
                    AppError::conflict(
                        "Short key already exists",
                        json!({
                            "constraint": SHORT_KEY_CONSTRAINT,
                            "short_key": new_short_url.short_key,
                        }),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(row.into())
    }

    async fn get_by_key(&self, short_key: &str) -> Result<Option<ShortUrl>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM short_urls WHERE short_key = $1");

        let row = sqlx::query_as::<_, ShortUrlRow>(&query)
            .bind(short_key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn get_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortUrl>, AppError> {
        let query = format!(
            "SELECT {COLUMNS} FROM short_urls WHERE original_url = $1 ORDER BY id LIMIT 1"
        );

        let row = sqlx::query_as::<_, ShortUrlRow>(&query)
            .bind(original_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, short_key: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE short_key = $1")
            .bind(short_key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn increment_hits(&self, short_key: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE short_urls SET hits = hits + 1, updated_at = NOW() WHERE short_key = $1",
        )
        .bind(short_key)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_key(&self, short_key: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE short_key = $1)",
        )
        .bind(short_key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
