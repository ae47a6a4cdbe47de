//! Handler for admin login.

use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::admin::{LoginRequest, LoginResponse};
use crate::api::middleware::auth::session_cookie;
use crate::error::AppError;
use crate::state::AppState;

/// Logs an admin in and sets the session cookie.
///
/// # Endpoint
///
/// `POST /api/admin/login` with `{"user": "...", "password": "..."}`
///
/// On success the response carries `Set-Cookie: admin_session=<token>`
/// (HttpOnly, SameSite=Strict, Secure on https deployments). The same token
/// is accepted as a Bearer token.
///
/// # Errors
///
/// - 401 `unauthorized` for wrong credentials
/// - 500 if `ADMIN_USER` / `ADMIN_PASSWORD` are not configured
pub async fn admin_login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let token = state.auth_service.login(&payload.user, &payload.password)?;

    Ok((
        [(SET_COOKIE, session_cookie(&token, state.secure_cookies()))],
        Json(LoginResponse {
            success: true,
            message: "Admin login successful.".to_string(),
        }),
    )
        .into_response())
}
