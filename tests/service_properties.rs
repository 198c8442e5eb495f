//! End-to-end properties of the short URL service over in-memory storage with
//! a live hit worker.

use std::collections::HashSet;
use std::sync::Arc;

use shortly::application::services::ShortUrlService;
use shortly::domain::hit_worker::run_hit_worker;
use shortly::domain::repositories::ShortUrlRepository;
use shortly::error::AppError;
use shortly::infrastructure::cache::NullCache;
use shortly::infrastructure::persistence::MemoryShortUrlRepository;
use shortly::utils::key_generator::is_well_formed_key;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct Harness {
    service: Arc<ShortUrlService<MemoryShortUrlRepository>>,
    repository: Arc<MemoryShortUrlRepository>,
    worker: JoinHandle<()>,
}

impl Harness {
    fn new() -> Self {
        let repository = Arc::new(MemoryShortUrlRepository::new());
        let (tx, rx) = mpsc::channel(1_000);
        let worker = tokio::spawn(run_hit_worker(rx, repository.clone(), 4));
        let service = Arc::new(ShortUrlService::new(
            repository.clone(),
            Arc::new(NullCache),
            tx,
            "http://short.ly/",
        ));

        Self {
            service,
            repository,
            worker,
        }
    }

    /// Drops the service (closing the hit channel) and waits until every queued
    /// hit has been applied.
    async fn drain(self) -> Arc<MemoryShortUrlRepository> {
        drop(self.service);
        self.worker.await.unwrap();
        self.repository
    }
}

#[tokio::test]
async fn test_round_trip() {
    let harness = Harness::new();

    for url in [
        "http://valid.com",
        "https://example.com/a/b?c=d#e",
        "https://例え.jp/パス",
        "http://localhost:8080/x",
    ] {
        let handle = harness.service.create_short_url(url).await.unwrap();

        assert!(is_well_formed_key(&handle.short_key));
        assert!(handle.short_url.starts_with("http://short.ly/"));
        assert_eq!(harness.service.resolve_url(&handle.short_key).await.unwrap(), url);
    }
}

#[tokio::test]
async fn test_dedup_creates_one_record() {
    let harness = Harness::new();

    let first = harness
        .service
        .create_short_url("https://example.com")
        .await
        .unwrap();
    let second = harness
        .service
        .create_short_url("https://example.com")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(harness.repository.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creations_get_distinct_keys() {
    let harness = Harness::new();

    let mut handles = Vec::new();
    for i in 0..200 {
        let service = harness.service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_short_url(&format!("https://example.com/{i}"))
                .await
                .unwrap()
        }));
    }

    let mut keys = HashSet::new();
    for handle in handles {
        keys.insert(handle.await.unwrap().short_key);
    }

    assert_eq!(keys.len(), 200);
    assert_eq!(harness.repository.len(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_bound_hits() {
    let harness = Harness::new();

    let handle = harness
        .service
        .create_short_url("https://example.com/popular")
        .await
        .unwrap();

    const RESOLVES: i64 = 50;
    let mut tasks = Vec::new();
    for _ in 0..RESOLVES {
        let service = harness.service.clone();
        let short_key = handle.short_key.clone();
        tasks.push(tokio::spawn(async move {
            service.resolve_url(&short_key).await.unwrap()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), "https://example.com/popular");
    }

    let repository = harness.drain().await;
    let record = repository.get_by_key(&handle.short_key).await.unwrap().unwrap();

    assert!(record.hits >= 1);
    assert!(record.hits <= RESOLVES);
}

#[tokio::test]
async fn test_metadata_reflects_hits_without_counting_itself() {
    let harness = Harness::new();

    let handle = harness
        .service
        .create_short_url("https://example.com/meta")
        .await
        .unwrap();

    for _ in 0..3 {
        harness.service.resolve_url(&handle.short_key).await.unwrap();
    }
    harness.service.get_metadata(&handle.short_key).await.unwrap();

    let repository = harness.drain().await;
    let record = repository.get_by_key(&handle.short_key).await.unwrap().unwrap();

    assert_eq!(record.hits, 3);
    assert!(record.updated_at >= record.created_at);
}

#[tokio::test]
async fn test_unknown_key_is_not_found() {
    let harness = Harness::new();

    assert!(matches!(
        harness.service.resolve_url("unknown").await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        harness.service.get_metadata("unknown").await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_then_resolve_is_not_found() {
    let harness = Harness::new();

    let handle = harness
        .service
        .create_short_url("https://example.com/gone")
        .await
        .unwrap();

    harness.service.delete_url(&handle.short_key).await.unwrap();

    assert!(matches!(
        harness.service.resolve_url(&handle.short_key).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        harness.service.delete_url(&handle.short_key).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_invalid_inputs() {
    let harness = Harness::new();

    assert!(matches!(
        harness.service.create_short_url("htp://bad").await,
        Err(AppError::InvalidUrl { .. })
    ));
    assert!(matches!(
        harness.service.create_short_url("").await,
        Err(AppError::InvalidRequest { .. })
    ));
    assert!(harness.repository.is_empty());
}
