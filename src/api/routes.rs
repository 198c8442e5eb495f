//! API route configuration.

use crate::api::handlers::{delete_url_handler, metadata_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /urls`              - Shorten a URL
/// - `GET    /urls/{short_key}`  - Metadata for a short key
/// - `DELETE /urls/{short_key}`  - Delete a short key
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(shorten_handler))
        .route(
            "/urls/{short_key}",
            get(metadata_handler).delete(delete_url_handler),
        )
}
