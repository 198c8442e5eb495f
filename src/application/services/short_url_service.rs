//! Short URL creation, resolution, metadata and deletion.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlHandle, UrlMetadata};
use crate::domain::hit_event::HitEvent;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::key_generator::{SHORT_KEY_LENGTH, generate_key};
use crate::utils::url_validator::validate_url;

/// Maximum number of candidate keys tried before giving up.
///
/// With 62^7 possible keys this only trips when the key space is close to full
/// or storage keeps rejecting inserts.
pub const MAX_KEY_ATTEMPTS: usize = 10;

/// Service orchestrating the short URL lifecycle.
///
/// Holds no mutable state of its own: uniqueness is decided by the repository and
/// hit counting is delegated to the hit worker through `hit_sender`.
pub struct ShortUrlService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    hit_sender: mpsc::Sender<HitEvent>,
    base_url: String,
}

impl<R: ShortUrlRepository + ?Sized> ShortUrlService<R> {
    /// Creates a new short URL service.
    ///
    /// `base_url` is the public prefix of every short URL, e.g. `http://short.ly/`.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        hit_sender: mpsc::Sender<HitEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            hit_sender,
            base_url: base_url.into(),
        }
    }

    /// Shortens `original_url`, reusing the existing key if the URL is known.
    ///
    /// # Deduplication
    ///
    /// A URL that already has a record gets that record's key back; nothing is
    /// written.
    ///
    /// # Key Generation
    ///
    /// Candidate keys are generated until one is free, for at most
    /// [`MAX_KEY_ATTEMPTS`] attempts. A uniqueness conflict on insert means a
    /// concurrent request won the race: if it stored the same URL, its key is
    /// returned, otherwise a fresh key is tried.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`] if `original_url` is empty or blank
    /// - [`AppError::InvalidUrl`] if it is not an absolute http/https URL
    /// - [`AppError::GenerationExhausted`] if no free key was found
    /// - [`AppError::Storage`] on repository failures
    pub async fn create_short_url(&self, original_url: &str) -> Result<ShortUrlHandle, AppError> {
        if original_url.trim().is_empty() {
            return Err(AppError::invalid_request(
                "URL must not be empty",
                json!({ "field": "url" }),
            ));
        }

        validate_url(original_url).map_err(|e| {
            AppError::invalid_url(
                "Invalid URL format. Only HTTP/HTTPS URLs are supported.",
                json!({ "url": original_url, "reason": e.to_string() }),
            )
        })?;

        if let Some(existing) = self.repository.get_by_original_url(original_url).await? {
            debug!(short_key = %existing.short_key, "URL already shortened");
            return Ok(self.handle_for(&existing));
        }

        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let short_key = generate_key(SHORT_KEY_LENGTH);

            if self.repository.exists_by_key(&short_key).await? {
                debug!(attempt, short_key, "Generated key already taken");
                continue;
            }

            let new_short_url = NewShortUrl {
                short_key: short_key.clone(),
                original_url: original_url.to_string(),
            };

            match self.repository.create(new_short_url).await {
                Ok(created) => {
                    metrics::counter!("shortly_short_urls_created_total").increment(1);
                    info!(short_key = %created.short_key, "Short URL created");
                    return Ok(self.handle_for(&created));
                }
                Err(AppError::Conflict { .. }) => {
                    if let Some(existing) =
                        self.repository.get_by_original_url(original_url).await?
                    {
                        return Ok(self.handle_for(&existing));
                    }
                    warn!(attempt, short_key, "Short key taken on insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::generation_exhausted(
            "Failed to generate a unique short key",
            json!({ "attempts": MAX_KEY_ATTEMPTS }),
        ))
    }

    /// Resolves `short_key` to its original URL and queues a hit.
    ///
    /// The hit is queued with `try_send` and never awaited. A full or closed
    /// queue loses the hit; the resolution itself still succeeds.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`] if `short_key` is empty
    /// - [`AppError::NotFound`] if no record exists
    /// - [`AppError::Storage`] on repository failures
    pub async fn resolve_url(&self, short_key: &str) -> Result<String, AppError> {
        Self::require_key(short_key)?;

        let original_url = match self.cache.get_url(short_key).await {
            Ok(Some(cached)) => cached,
            Ok(None) => self.resolve_from_repository(short_key).await?,
            Err(e) => {
                warn!(short_key, error = %e, "Cache lookup failed, using repository");
                self.resolve_from_repository(short_key).await?
            }
        };

        self.dispatch_hit(short_key);

        Ok(original_url)
    }

    /// Returns a read-only snapshot of the record behind `short_key`.
    ///
    /// Always read from the repository so `hits` reflects every completed increment.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`] if `short_key` is empty
    /// - [`AppError::NotFound`] if no record exists
    pub async fn get_metadata(&self, short_key: &str) -> Result<UrlMetadata, AppError> {
        Self::require_key(short_key)?;

        self.repository
            .get_by_key(short_key)
            .await?
            .map(UrlMetadata::from)
            .ok_or_else(|| Self::not_found(short_key))
    }

    /// Deletes the record behind `short_key`.
    ///
    /// Deleting a key that does not exist fails with [`AppError::NotFound`], so a
    /// second delete of the same key is reported the same way as an unknown key.
    ///
    /// The cached mapping is invalidated after the row is gone, whether or not a
    /// row existed, so retrying a failed delete clears a stale entry.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`] if `short_key` is empty
    /// - [`AppError::NotFound`] if nothing was deleted
    /// - [`AppError::Storage`] if the repository or the cache invalidation fails
    pub async fn delete_url(&self, short_key: &str) -> Result<(), AppError> {
        Self::require_key(short_key)?;

        let deleted = self.repository.delete(short_key).await?;

        if let Err(e) = self.cache.invalidate(short_key).await {
            error!(short_key, error = %e, "Failed to invalidate cached URL");
            return Err(AppError::storage(
                "Failed to invalidate cached URL",
                json!({ "short_key": short_key, "reason": e.to_string() }),
            ));
        }

        if deleted == 0 {
            return Err(Self::not_found(short_key));
        }

        info!(short_key, "Short URL deleted");
        Ok(())
    }

    /// Checks if the repository is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    async fn resolve_from_repository(&self, short_key: &str) -> Result<String, AppError> {
        let record = self
            .repository
            .get_by_key(short_key)
            .await?
            .ok_or_else(|| Self::not_found(short_key))?;

        if let Err(e) = self
            .cache
            .set_url(short_key, &record.original_url, None)
            .await
        {
            warn!(short_key, error = %e, "Failed to cache URL");
        }

        // A delete that finished between the read and the cache write has
        // already run its invalidation; drop the entry written after it.
        if !self.repository.exists_by_key(short_key).await? {
            if let Err(e) = self.cache.invalidate(short_key).await {
                warn!(short_key, error = %e, "Failed to invalidate cached URL");
            }
            return Err(Self::not_found(short_key));
        }

        Ok(record.original_url)
    }

    fn dispatch_hit(&self, short_key: &str) {
        match self.hit_sender.try_send(HitEvent::new(short_key)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("shortly_hits_dropped_total").increment(1);
                warn!(short_key = %event.short_key, "Hit queue full, hit dropped");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("shortly_hits_dropped_total").increment(1);
                debug!(short_key = %event.short_key, "Hit queue closed, hit dropped");
            }
        }
    }

    fn handle_for(&self, record: &ShortUrl) -> ShortUrlHandle {
        ShortUrlHandle::new(&self.base_url, &record.short_key)
    }

    fn require_key(short_key: &str) -> Result<(), AppError> {
        if short_key.trim().is_empty() {
            return Err(AppError::invalid_request(
                "Short key must not be empty",
                json!({ "field": "short_key" }),
            ));
        }
        Ok(())
    }

    fn not_found(short_key: &str) -> AppError {
        AppError::not_found(
            format!("No URL found with short key {short_key}"),
            json!({ "short_key": short_key }),
        )
    }
}
