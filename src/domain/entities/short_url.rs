//! Short URL entity and the views derived from it.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored mapping from a short key to an original URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortUrl {
    pub id: i64,
    pub short_key: String,
    pub original_url: String,
    pub hits: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        id: i64,
        short_key: String,
        original_url: String,
        hits: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_key,
            original_url,
            hits,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a short URL. New records always start with zero hits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortUrl {
    pub short_key: String,
    pub original_url: String,
}

/// What a caller gets back after shortening a URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlHandle {
    pub short_key: String,
    pub short_url: String,
}

impl ShortUrlHandle {
    /// Builds the public short URL by joining `base_url` and `short_key` with one slash.
    pub fn new(base_url: &str, short_key: &str) -> Self {
        Self {
            short_key: short_key.to_string(),
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), short_key),
        }
    }
}

/// Read-only snapshot of a short URL record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetadata {
    pub short_key: String,
    pub original_url: String,
    pub hits: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShortUrl> for UrlMetadata {
    fn from(record: ShortUrl) -> Self {
        Self {
            short_key: record.short_key,
            original_url: record.original_url,
            hits: record.hits,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
