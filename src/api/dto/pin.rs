//! DTOs for PIN-protected link endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PinInfoResponse {
    pub protected: bool,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPinRequest {
    #[serde(default)]
    pub pin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPinResponse {
    pub original_url: String,
}
