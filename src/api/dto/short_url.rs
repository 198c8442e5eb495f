//! DTOs for the short URL endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortUrlHandle;

/// Request body for `POST /api/urls`.
///
/// `url` is optional so a missing field reaches the service and is reported as an
/// invalid request instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateShortUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response body for `POST /api/urls`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_key: String,
    pub short_url: String,
}

impl From<ShortUrlHandle> for CreateShortUrlResponse {
    fn from(handle: ShortUrlHandle) -> Self {
        Self {
            short_key: handle.short_key,
            short_url: handle.short_url,
        }
    }
}
