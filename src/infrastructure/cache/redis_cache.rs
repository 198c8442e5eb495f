//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "short_url:";

/// Redis cache for resolve lookups.
///
/// Shares one multiplexed [`ConnectionManager`] that reconnects on its own.
/// Reads and writes are fail-open: errors are logged and reported as misses or
/// successes.
pub struct RedisCache {
    connection: ConnectionManager,
    default_ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and verifies the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_url`] gets no TTL
    /// (`CACHE_TTL_SECONDS`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Invalid Redis URL: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut probe = connection.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            connection,
            default_ttl_seconds,
        })
    }

    fn key(short_key: &str) -> String {
        format!("{KEY_PREFIX}{short_key}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection.clone();

        match conn.get::<_, Option<String>>(Self::key(short_key)).await {
            Ok(found) => {
                debug!(short_key, hit = found.is_some(), "Cache lookup");
                Ok(found)
            }
            Err(e) => {
                warn!(short_key, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        short_key: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl_seconds);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::key(short_key), original_url, ttl)
            .await
        {
            warn!(short_key, error = %e, "Redis SET failed");
        }

        Ok(())
    }

    async fn invalidate(&self, short_key: &str) -> CacheResult<()> {
        let mut conn = self.connection.clone();

        // A stale entry after delete would resolve a removed key.
        conn.del::<_, i64>(Self::key(short_key))
            .await
            .map(|_| ())
            .map_err(|e| CacheError::Operation(format!("Redis DEL failed: {}", e)))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_namespaced() {
        assert_eq!(RedisCache::key("abc1234"), "short_url:abc1234");
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisCache::connect("not-a-redis-url", 60).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
