//! Handler for short URL creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::short_url::{CreateShortUrlRequest, CreateShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortKey": "aZ3k9Qx",
///   "shortUrl": "http://short.ly/aZ3k9Qx"
/// }
/// ```
///
/// Shortening a URL that is already stored returns its existing key.
///
/// # Errors
///
/// - 400 Bad Request if the body is not JSON, `url` is missing or blank, or the
///   URL is not an absolute http/https URL
/// - 500 Internal Server Error if no free key was found or storage failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::invalid_request(
            "Request body must be a JSON object with a \"url\" field",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let url = request.url.unwrap_or_default();
    let handle = state.short_url_service.create_short_url(&url).await?;

    Ok((StatusCode::CREATED, Json(handle.into())))
}
