//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored short key to original URL mapping
//! - [`NewShortUrl`] - Input for creating a record
//! - [`ShortUrlHandle`] - Public result of a shorten request
//! - [`UrlMetadata`] - Read-only snapshot returned by metadata lookups

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl, ShortUrlHandle, UrlMetadata};
