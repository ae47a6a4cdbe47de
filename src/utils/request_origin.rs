//! Request origin extraction for building short URLs.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds the public origin (`scheme://host[:port]`) of the current request.
///
/// The host comes from the `Host` header and keeps its port, so short URLs
/// issued on `localhost:3000` stay resolvable. The scheme comes from the first
/// `X-Forwarded-Proto` value when it is `http` or `https`, otherwise from
/// `default_scheme`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8 or whitespace
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "s.example.com".parse().unwrap());
///
/// let origin = extract_origin_from_headers(&headers, "https").unwrap();
/// assert_eq!(origin, "https://s.example.com");
/// ```
pub fn extract_origin_from_headers(
    headers: &HeaderMap,
    default_scheme: &str,
) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() || host.contains(char::is_whitespace) || host.contains('/') {
        return Err(AppError::bad_request(
            "Invalid Host header",
            json!({ "host": host }),
        ));
    }

    let scheme = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| default_scheme.to_string());

    Ok(format!("{}://{}", scheme, host))
}

/// Joins an origin and a slug into a short URL.
pub fn short_url(origin: &str, slug: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), slug)
}
