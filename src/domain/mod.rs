//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`hit_event`] - Hit tracking event model
//! - [`hit_worker`] - Asynchronous hit counting worker
//!
//! # Hit Counting Flow
//!
//! 1. [`crate::application::services::ShortUrlService::resolve_url`] finds the record
//! 2. A [`hit_event::HitEvent`] is pushed to a bounded channel without waiting
//! 3. [`hit_worker::run_hit_worker`] applies `hits = hits + 1` via
//!    [`repositories::ShortUrlRepository::increment_hits`]
//! 4. Failures end in a log line and a metrics counter, never in the response

pub mod entities;
pub mod hit_event;
pub mod hit_worker;
pub mod repositories;
