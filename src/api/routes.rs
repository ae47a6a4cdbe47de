//! API route configuration.
//!
//! Every endpoint is public. Admin-only operations check the caller inside the
//! handler through [`crate::application::services::AdminAuthorizer`].

use crate::api::handlers::{
    admin_login_handler, link_details_handler, list_reports_handler, pin_info_handler,
    report_handler, resolve_link_handler, set_status_handler, shorten_handler,
    verify_pin_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`                - Create a short link
/// - `GET  /links/{slug}`           - Resolve as JSON (counts a click)
/// - `GET  /links/{slug}/info`      - Read-only lookup
/// - `GET  /p/{slug}/info`          - Whether a PIN is required
/// - `POST /p/{slug}/verify`        - Verify a PIN
/// - `POST /reports`                - Report a link
/// - `GET  /reports`                - List reported links
/// - `PUT  /reports/{slug}/status`  - Set moderation status (admin)
/// - `POST /admin/login`            - Admin login
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links/{slug}", get(resolve_link_handler))
        .route("/links/{slug}/info", get(link_details_handler))
        .route("/p/{slug}/info", get(pin_info_handler))
        .route("/p/{slug}/verify", post(verify_pin_handler))
        .route("/reports", post(report_handler).get(list_reports_handler))
        .route("/reports/{slug}/status", put(set_status_handler))
        .route("/admin/login", post(admin_login_handler))
}
