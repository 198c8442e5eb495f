//! In-memory implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    records: HashMap<String, ShortUrl>,
    next_id: i64,
}

/// `HashMap`-backed repository for tests and embedding.
///
/// Mirrors the PostgreSQL semantics: keys are unique (a duplicate insert is a
/// [`AppError::Conflict`]), increments are additive and refresh `updated_at`.
/// All records live behind one `RwLock`; no lock is held across an `.await`.
#[derive(Default)]
pub struct MemoryShortUrlRepository {
    store: RwLock<Store>,
}

impl MemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.records.len()).unwrap_or(0)
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, AppError> {
        self.store
            .read()
            .map_err(|_| AppError::storage("In-memory store lock poisoned", json!({})))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, AppError> {
        self.store
            .write()
            .map_err(|_| AppError::storage("In-memory store lock poisoned", json!({})))
    }
}

#[async_trait]
impl ShortUrlRepository for MemoryShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut store = self.write()?;

        if store.records.contains_key(&new_short_url.short_key) {
            return Err(AppError::conflict(
                "Short key already exists",
                json!({ "short_key": new_short_url.short_key }),
            ));
        }

        store.next_id += 1;
        let now = Utc::now();
        let record = ShortUrl::new(
            store.next_id,
            new_short_url.short_key,
            new_short_url.original_url,
            0,
            now,
            now,
        );
        store
            .records
            .insert(record.short_key.clone(), record.clone());

        Ok(record)
    }

    async fn get_by_key(&self, short_key: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.read()?.records.get(short_key).cloned())
    }

    async fn get_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortUrl>, AppError> {
        Ok(self
            .read()?
            .records
            .values()
            .filter(|r| r.original_url == original_url)
            .min_by_key(|r| r.id)
            .cloned())
    }

    async fn delete(&self, short_key: &str) -> Result<u64, AppError> {
        Ok(self.write()?.records.remove(short_key).map_or(0, |_| 1))
    }

    async fn increment_hits(&self, short_key: &str) -> Result<bool, AppError> {
        let mut store = self.write()?;

        match store.records.get_mut(short_key) {
            Some(record) => {
                record.hits += 1;
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists_by_key(&self, short_key: &str) -> Result<bool, AppError> {
        Ok(self.read()?.records.contains_key(short_key))
    }

    async fn health_check(&self) -> bool {
        self.read().is_ok()
    }
}
