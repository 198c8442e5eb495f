//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of short key to original URL mappings.
///
/// Reads are fail-open: a broken cache degrades to repository lookups. A failed
/// [`CacheService::invalidate`] fails the delete that issued it.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached original URL for `short_key`.
    ///
    /// `Ok(None)` on a miss. Production implementations report backend errors as
    /// misses.
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping. `ttl_seconds = None` uses the implementation default.
    async fn set_url(
        &self,
        short_key: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping. Called when a short URL is deleted.
    async fn invalidate(&self, short_key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
