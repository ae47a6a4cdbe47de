//! Handlers for JSON slug lookups.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::api::dto::links::{LinkDetailsResponse, ResolveResponse};
use crate::application::services::RedirectDecision;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::{extract_origin_from_headers, short_url};

/// Resolves a slug for clients that redirect on their own.
///
/// # Endpoint
///
/// `GET /api/links/{slug}`
///
/// Counts a click exactly like `GET /{slug}`. A protected link answers
/// `{"slug": "...", "protected": true}` without counting.
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or invalid `Host` header, before
/// anything is counted.
pub async fn resolve_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResolveResponse>, AppError> {
    let origin = extract_origin_from_headers(&headers, &state.public_scheme)?;

    let response = match state.resolve_service.resolve(&slug).await? {
        RedirectDecision::Redirect(link) => {
            let url = short_url(&origin, &link.slug);
            ResolveResponse::resolved(link, url)
        }
        RedirectDecision::PinRequired { slug } => ResolveResponse::pin_required(slug),
    };

    Ok(Json(response))
}

/// Read-only slug lookup. Never counts a click.
///
/// # Endpoint
///
/// `GET /api/links/{slug}/info`
pub async fn link_details_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let details = state.resolve_service.details(&slug).await?;
    Ok(Json(details.into()))
}
