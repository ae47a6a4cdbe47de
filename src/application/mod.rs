//! Application layer services implementing business logic.
//!
//! Services validate input before any store call, coordinate repository
//! operations and publish link events. HTTP handlers and the admin CLI only
//! talk to this layer.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short link creation
//! - [`services::resolve_service::ResolveService`] - Redirect decisions, PIN checks and lookups
//! - [`services::moderation_service::ModerationService`] - Reports and admin status changes
//! - [`services::auth_service::AuthService`] - Admin login and session checks

pub mod services;
