//! Utility functions for slug generation, input validation, and request handling.
//!
//! - [`slug`] - Random slug generation and format checks
//! - [`pin`] - Legacy PIN format check and comparison
//! - [`url_validation`] - Absolute URL validation for shortening
//! - [`request_origin`] - Public origin extraction from HTTP headers

pub mod pin;
pub mod request_origin;
pub mod slug;
pub mod url_validation;
