//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, the hit worker, and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::domain::hit_worker::run_hit_worker;
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::PgShortUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long shutdown waits for queued hits to be written.
const HIT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the PostgreSQL pool from the pool settings in `config`.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Connects the Redis cache, or falls back to [`NullCache`].
///
/// An unreachable Redis is logged and never fails startup.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let redis_url = match config.redis_url.as_deref() {
        Some(url) if config.is_cache_enabled() => url,
        _ => {
            tracing::info!("Cache disabled (NullCache)");
            return Arc::new(NullCache::new());
        }
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Background hit worker
/// - Axum HTTP server
///
/// On Ctrl-C the server stops accepting connections, finishes in-flight
/// requests, then waits for the hit worker to write queued hits.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let cache = connect_cache(&config).await;

    let repository: Arc<dyn ShortUrlRepository> =
        Arc::new(PgShortUrlRepository::new(Arc::new(pool)));

    let (hit_tx, hit_rx) = mpsc::channel(config.hit_queue_capacity);
    let worker = tokio::spawn(run_hit_worker(
        hit_rx,
        repository.clone(),
        config.hit_worker_concurrency,
    ));
    tracing::info!("Hit worker started");

    let state = AppState::new(repository, cache, hit_tx, config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    // Serving consumes the router, so every hit sender is dropped once this
    // returns and the worker sees a closed channel.
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, draining hit queue");
    match tokio::time::timeout(HIT_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Hit worker panicked: {}", e),
        Err(_) => tracing::warn!(
            "Hit queue not drained within {}s, remaining hits lost",
            HIT_DRAIN_TIMEOUT.as_secs()
        ),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
