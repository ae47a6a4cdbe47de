//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL. Scheme and host are checked by the service.
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "URL must be 1 to 2048 characters"))]
    pub original_url: String,

    /// Optional 4 to 6 digit PIN, honoured only when PIN mode is enabled.
    #[serde(default)]
    pub pin: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub slug: String,
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"originalUrl":"https://example.com","pin":"1234"}"#).unwrap();

        assert_eq!(req.original_url, "https://example.com");
        assert_eq!(req.pin.as_deref(), Some("1234"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_url_fails_validation() {
        let req: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
