//! Validation of URLs submitted for shortening.
//!
//! Accepted ASCII URLs are stored exactly as submitted (minus surrounding
//! whitespace), so resolution returns them unchanged. Every accepted URL is
//! usable as a `Location` header value.

use std::borrow::Cow;

use url::Url;

/// Schemes that are never accepted as redirect targets.
const FORBIDDEN_SCHEMES: &[&str] = &["javascript", "data", "vbscript"];

/// Errors that can occur while validating a URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must not contain control characters or whitespace")]
    InvalidCharacters,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must be absolute with a scheme and a host")]
    MissingAuthority,

    #[error("The '{0}' scheme is not allowed")]
    ForbiddenScheme(String),
}

/// Checks that `input` is a well-formed absolute URI with scheme and authority.
///
/// Returns the trimmed input on success. Input with non-ASCII characters is
/// returned in its percent-encoded serialization instead, since raw non-ASCII
/// bytes are not valid in a `Location` header.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for empty or whitespace-only input
/// - [`UrlValidationError::InvalidCharacters`] for control characters or inner whitespace
/// - [`UrlValidationError::InvalidFormat`] if the URL does not parse
/// - [`UrlValidationError::MissingAuthority`] for URLs without a host (`mailto:`, `file:///`)
/// - [`UrlValidationError::ForbiddenScheme`] for script-bearing schemes
///
/// # Examples
///
/// ```ignore
/// assert!(validate_original_url("https://example.com/page").is_ok());
/// assert!(validate_original_url("not-a-url").is_err());
/// ```
pub fn validate_original_url(input: &str) -> Result<Cow<'_, str>, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    // The parser silently strips tabs and newlines, so check the raw input.
    if trimmed.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if FORBIDDEN_SCHEMES.contains(&url.scheme()) {
        return Err(UrlValidationError::ForbiddenScheme(url.scheme().to_string()));
    }

    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingAuthority);
    }

    if trimmed.is_ascii() {
        Ok(Cow::Borrowed(trimmed))
    } else {
        Ok(Cow::Owned(url.into()))
    }
}
