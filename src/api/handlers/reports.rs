//! Handlers for reporting and moderation.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::reports::{
    LinkView, ReportRequest, ReportResponse, ReportsQuery, UpdateStatusRequest,
    UpdateStatusResponse,
};
use crate::api::middleware::auth::Caller;
use crate::application::services::require_admin;
use crate::error::AppError;
use crate::state::AppState;

/// Reports a link for moderation.
///
/// # Endpoint
///
/// `POST /api/reports`
///
/// # Request Body
///
/// ```json
/// { "slug": "AbC12", "reason": "spam" }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Report for /AbC12 submitted successfully. It will be reviewed.", "newStatus": "pending" }
/// ```
///
/// Reporting a blocked link succeeds without recording anything and answers
/// `"newStatus": "blocked"`.
pub async fn report_handler(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    payload.validate()?;

    let result = state
        .moderation_service
        .report(&payload.slug, payload.reason.as_deref())
        .await?;

    Ok(Json(ReportResponse {
        message: result.message,
        new_status: result.new_status,
    }))
}

/// Lists reported links, most recently reported first.
///
/// # Endpoint
///
/// `GET /api/reports?limit=50`
///
/// `limit` defaults to 100 and is clamped to 1..=100. Original URLs of blocked
/// or protected links are only shown to admins.
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is not an integer.
pub async fn list_reports_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    query: Result<Query<ReportsQuery>, QueryRejection>,
) -> Result<Json<Vec<LinkView>>, AppError> {
    let Query(params) = query.map_err(|e| {
        AppError::bad_request("Invalid query parameters", json!({ "reason": e.body_text() }))
    })?;

    let is_admin = state.authorizer.is_admin(&caller);
    let pin_mode_enabled = state.pin_mode_enabled();

    let links = state.moderation_service.list_reported(params.limit).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkView::new(link, is_admin, pin_mode_enabled))
            .collect(),
    ))
}

/// Sets the moderation status of a link. Admin only.
///
/// # Endpoint
///
/// `PUT /api/reports/{slug}/status` with `{"status": "blocked"}`
///
/// # Authentication
///
/// `admin_session` cookie or `Authorization: Bearer <token>`, see
/// [`crate::api::handlers::admin_login_handler`].
///
/// # Errors
///
/// - 403 `forbidden` for non-admins, before the body is even parsed
/// - 400 for a missing or malformed body
/// - 400 for a status other than pending, approved or blocked
/// - 404 for unknown slugs
pub async fn set_status_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Caller(caller): Caller,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    let is_admin = state.authorizer.is_admin(&caller);
    require_admin(&slug, is_admin)?;

    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;

    let change = state
        .moderation_service
        .set_status(&slug, &payload.status, is_admin)
        .await?;

    Ok(Json(UpdateStatusResponse {
        message: change.message,
        changed: change.changed,
        status: change.status,
    }))
}
