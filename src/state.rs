use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::ShortUrlService;
use crate::domain::hit_event::HitEvent;
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::cache::CacheService;

/// Shared state injected into every handler.
///
/// `hit_sender` is the same channel the service dispatches hits on; the health
/// handler reads its remaining capacity.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService<dyn ShortUrlRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub hit_sender: mpsc::Sender<HitEvent>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        cache: Arc<dyn CacheService>,
        hit_sender: mpsc::Sender<HitEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        let short_url_service = Arc::new(ShortUrlService::new(
            repository,
            cache.clone(),
            hit_sender.clone(),
            base_url,
        ));

        Self {
            short_url_service,
            cache,
            hit_sender,
        }
    }
}
