//! Caller credential extraction for admin-only operations.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::COOKIE, request::Parts},
};
use axum_auth::AuthBearer;

use crate::application::services::CallerContext;
use crate::application::services::auth_service::ADMIN_SESSION_COOKIE;

/// Credentials presented with the request, if any.
///
/// Extraction never fails: a request without credentials yields an empty
/// [`CallerContext`], and the admin decision is left to
/// [`crate::application::services::AdminAuthorizer`].
///
/// # Sources
///
/// ```text
/// Authorization: Bearer <token>
/// Cookie: admin_session=<token>
/// ```
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>, Caller(caller): Caller) {
///     let is_admin = state.authorizer.is_admin(&caller);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub CallerContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let bearer_token = AuthBearer::from_request_parts(parts, &())
            .await
            .ok()
            .map(|AuthBearer(token)| token);

        let session_cookie = cookie_value(&parts.headers, ADMIN_SESSION_COOKIE);

        Ok(Caller(CallerContext {
            bearer_token,
            session_cookie,
        }))
    }
}

/// Extracts a cookie by name.
///
/// Handles multiple cookies in one or more `Cookie` headers by splitting on
/// semicolons and ignoring other cookies.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Builds the `Set-Cookie` value for a fresh admin session.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie =
        format!("{ADMIN_SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
