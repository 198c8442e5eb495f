//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{short_key}`
///
/// # Request Flow
///
/// 1. Look the key up (cache first, then storage)
/// 2. Queue a hit for the background worker
/// 3. Return 302 Found with the original URL in `Location`
///
/// The hit is counted after the response is sent. A full hit queue drops the
/// hit, never the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short key doesn't exist.
pub async fn redirect_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.short_url_service.resolve_url(&short_key).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
