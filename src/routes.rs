//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Service banner
//! - `GET  /health`      - Health check: storage, cache, hit queue
//! - `GET  /{short_key}` - Short URL redirect
//! - `/api/*`            - Short URL management
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
///
/// Static segments win over `/{short_key}`, so `health` is never resolved as a
/// short key.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/{short_key}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] so `/api/urls/` and `/api/urls` hit the same route.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
