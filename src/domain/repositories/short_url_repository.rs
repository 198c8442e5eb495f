//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for short URL records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryShortUrlRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Inserts a new record with `hits = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short key is already taken.
    /// Returns [`AppError::Storage`] on storage failures.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a record by its short key.
    async fn get_by_key(&self, short_key: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds the record created for `original_url`, if any.
    ///
    /// Used for deduplication before a new key is generated.
    async fn get_by_original_url(&self, original_url: &str)
    -> Result<Option<ShortUrl>, AppError>;

    /// Deletes the record with the given short key and returns the number of rows removed.
    async fn delete(&self, short_key: &str) -> Result<u64, AppError>;

    /// Atomically adds one to `hits` and refreshes `updated_at`.
    ///
    /// Returns `true` if a row was updated, `false` if the key no longer exists.
    async fn increment_hits(&self, short_key: &str) -> Result<bool, AppError>;

    /// Returns `true` if a record with this short key exists.
    async fn exists_by_key(&self, short_key: &str) -> Result<bool, AppError>;

    /// Checks if the storage backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
