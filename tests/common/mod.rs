#![allow(dead_code)]

use std::sync::Arc;

use shortly::domain::hit_event::HitEvent;
use shortly::domain::repositories::ShortUrlRepository;
use shortly::infrastructure::cache::NullCache;
use shortly::infrastructure::persistence::MemoryShortUrlRepository;
use shortly::state::AppState;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://short.ly/";

/// State over an empty in-memory repository. The receiver is handed back so
/// tests can observe queued hits.
pub fn create_test_state() -> (
    AppState,
    Arc<MemoryShortUrlRepository>,
    mpsc::Receiver<HitEvent>,
) {
    let repository = Arc::new(MemoryShortUrlRepository::new());
    let (state, rx) = create_test_state_with(repository.clone(), 100);
    (state, repository, rx)
}

pub fn create_test_state_with(
    repository: Arc<dyn ShortUrlRepository>,
    queue_capacity: usize,
) -> (AppState, mpsc::Receiver<HitEvent>) {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let state = AppState::new(repository, Arc::new(NullCache), tx, BASE_URL);
    (state, rx)
}

pub async fn create_test_short_url(
    repository: &MemoryShortUrlRepository,
    short_key: &str,
    original_url: &str,
) {
    repository
        .create(shortly::domain::entities::NewShortUrl {
            short_key: short_key.to_string(),
            original_url: original_url.to_string(),
        })
        .await
        .unwrap();
}
