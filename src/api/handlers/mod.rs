//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod health;
pub mod links;
pub mod pin;
pub mod redirect;
pub mod reports;
pub mod shorten;

pub use admin::admin_login_handler;
pub use health::health_handler;
pub use links::{link_details_handler, resolve_link_handler};
pub use pin::{pin_info_handler, verify_pin_handler};
pub use redirect::redirect_handler;
pub use reports::{list_reports_handler, report_handler, set_status_handler};
pub use shorten::shorten_handler;
