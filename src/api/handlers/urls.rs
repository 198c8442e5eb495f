//! Handlers for reading and deleting a short URL.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::entities::UrlMetadata;
use crate::error::AppError;
use crate::state::AppState;

/// Returns metadata for a short key.
///
/// # Endpoint
///
/// `GET /api/urls/{short_key}`
///
/// Reading metadata does not count as a hit.
///
/// # Response
///
/// ```json
/// {
///   "shortKey": "aZ3k9Qx",
///   "originalUrl": "https://example.com/some/long/path",
///   "hits": 42,
///   "createdAt": "2025-01-01T12:00:00Z",
///   "updatedAt": "2025-01-02T08:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short key doesn't exist.
pub async fn metadata_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlMetadata>, AppError> {
    let metadata = state.short_url_service.get_metadata(&short_key).await?;
    Ok(Json(metadata))
}

/// Deletes a short key.
///
/// # Endpoint
///
/// `DELETE /api/urls/{short_key}`
///
/// # Errors
///
/// Returns 404 Not Found if the short key doesn't exist, including when it was
/// already deleted.
pub async fn delete_url_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.short_url_service.delete_url(&short_key).await?;
    Ok(StatusCode::NO_CONTENT)
}
