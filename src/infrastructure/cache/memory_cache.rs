//! In-process cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// `HashMap`-backed cache for tests and embedding.
///
/// Entries never expire; `ttl_seconds` is accepted and ignored.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached mappings.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::Operation("In-memory cache lock poisoned".to_string())
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(short_key).cloned())
    }

    async fn set_url(
        &self,
        short_key: &str,
        original_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(short_key.to_string(), original_url.to_string());
        Ok(())
    }

    async fn invalidate(&self, short_key: &str) -> CacheResult<()> {
        self.entries.write().map_err(poisoned)?.remove(short_key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.entries.read().is_ok()
    }
}
