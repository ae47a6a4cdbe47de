//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::RedirectDecision;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Responses
///
/// - **307 Temporary Redirect** to the original URL; the click is counted
/// - **302 Found** to `/p/{slug}` when the link needs a PIN; nothing is counted
///
/// # Errors
///
/// Returns 404 Not Found for unknown or malformed slugs and 403 Forbidden
/// for blocked links. Neither response contains the original URL.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.resolve_service.resolve(&slug).await? {
        RedirectDecision::Redirect(link) => {
            Ok(Redirect::temporary(&link.original_url).into_response())
        }
        RedirectDecision::PinRequired { slug } => Ok((
            StatusCode::FOUND,
            [(header::LOCATION, format!("/p/{slug}"))],
        )
            .into_response()),
    }
}
