//! Handlers for PIN-protected links.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::pin::{PinInfoResponse, VerifyPinRequest, VerifyPinResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/p/{slug}/info`
pub async fn pin_info_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PinInfoResponse>, AppError> {
    let info = state.resolve_service.info(&slug).await?;

    Ok(Json(PinInfoResponse {
        protected: info.protected,
    }))
}

/// Verifies a PIN and returns the original URL.
///
/// # Endpoint
///
/// `POST /api/p/{slug}/verify` with `{"pin": "4821"}`
///
/// # Errors
///
/// - 400 if the PIN is not 4 to 6 digits
/// - 401 `invalid_pin` on mismatch
/// - 403 / 404 as for redirects
pub async fn verify_pin_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<VerifyPinRequest>,
) -> Result<Json<VerifyPinResponse>, AppError> {
    let link = state.resolve_service.verify_pin(&slug, &payload.pin).await?;

    Ok(Json(VerifyPinResponse {
        original_url: link.original_url,
    }))
}
