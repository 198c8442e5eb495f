//! Syntactic validation of URLs submitted for shortening.
//!
//! Validation never touches the network and never rewrites the input: an accepted
//! URL is stored exactly as the caller sent it.

use url::Url;

/// Reasons a URL can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs are supported, got '{0}'")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http` or `https` URL.
///
/// # Rules
///
/// 1. Must not contain whitespace or control characters anywhere
/// 2. Must parse as an absolute URL (relative references are rejected)
/// 3. Scheme must be exactly `http` or `https`
/// 4. Must carry a non-empty host
///
/// Malformed authorities, ports and percent-encodings fail at step 2. The parser
/// drops tabs, newlines and surrounding spaces on its own, so step 1 runs on the
/// raw input that will be stored.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparsable input,
/// [`UrlValidationError::UnsupportedScheme`] for any other scheme and
/// [`UrlValidationError::MissingHost`] if no host is present.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if let Some(c) = input.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::InvalidFormat(format!(
            "unexpected character {c:?}"
        )));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
