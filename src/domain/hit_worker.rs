//! Background worker applying hit increments.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, warn};

use crate::domain::hit_event::HitEvent;
use crate::domain::repositories::ShortUrlRepository;

/// Consumes hit events and increments the matching counters.
///
/// Up to `concurrency` increments run at once. Failures are logged and counted,
/// never retried: a retry after an ambiguous failure could count one resolution
/// twice. The worker returns once the channel is closed and every in-flight
/// increment has finished.
pub async fn run_hit_worker<R>(
    mut rx: mpsc::Receiver<HitEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: ShortUrlRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            record_hit(repository.as_ref(), &event).await;
            drop(repository);
            drop(permit);
        });
    }

    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Hit worker stopped");
}

async fn record_hit<R>(repository: &R, event: &HitEvent)
where
    R: ShortUrlRepository + ?Sized,
{
    match repository.increment_hits(&event.short_key).await {
        Ok(true) => {
            metrics::counter!("shortly_hits_recorded_total").increment(1);
            debug!(short_key = %event.short_key, "Hit recorded");
        }
        Ok(false) => {
            debug!(
                short_key = %event.short_key,
                "Short URL removed before its hit was recorded"
            );
        }
        Err(e) => {
            metrics::counter!("shortly_hits_failed_total").increment(1);
            warn!(
                short_key = %event.short_key,
                resolved_at = %event.resolved_at,
                error = %e,
                "Failed to record hit"
            );
        }
    }
}
