//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::extract_origin_from_headers;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/page", "pin": "4821" }
/// ```
///
/// `pin` is optional and only accepted when PIN mode is enabled.
///
/// # Response
///
/// ```json
/// { "slug": "AbC12", "shortUrl": "https://s.example.com/AbC12" }
/// ```
///
/// The short URL origin is taken from the request's `Host` and
/// `X-Forwarded-Proto` headers.
///
/// # Errors
///
/// - 400 `invalid_input` for a malformed URL or PIN
/// - 500 `slug_exhausted` if no free slug was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let origin = extract_origin_from_headers(&headers, &state.public_scheme)?;

    let link = state
        .shorten_service
        .shorten(&payload.original_url, payload.pin, &origin)
        .await?;

    Ok(Json(ShortenResponse {
        slug: link.slug,
        short_url: link.short_url,
    }))
}
