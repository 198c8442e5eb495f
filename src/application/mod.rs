//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and expose the operations the
//! HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Short URL creation,
//!   resolution, metadata and deletion

pub mod services;
