//! Hit event model for asynchronous hit counting.

use chrono::{DateTime, Utc};

/// One successful resolution of a short key, queued for counting.
///
/// Created by [`crate::application::services::ShortUrlService::resolve_url`] and
/// sent to a bounded channel without waiting, then applied by
/// [`crate::domain::hit_worker::run_hit_worker`]. The resolving request never
/// observes whether the increment succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEvent {
    pub short_key: String,
    pub resolved_at: DateTime<Utc>,
}

impl HitEvent {
    /// Creates a hit event stamped with the current time.
    pub fn new(short_key: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            resolved_at: Utc::now(),
        }
    }
}
