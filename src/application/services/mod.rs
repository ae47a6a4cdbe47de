//! Business logic services for the application layer.

pub mod auth_service;
pub mod moderation_service;
pub mod resolve_service;
pub mod shorten_service;
pub mod slug_generator;

pub use auth_service::{AdminAuthorizer, AdminCredentials, AuthService, CallerContext};
pub use moderation_service::{ModerationService, ReportResult, StatusChange, require_admin};
pub use resolve_service::{LinkDetails, LinkInfo, RedirectDecision, ResolveService, ResolvedLink};
pub use shorten_service::{ShortenService, ShortenedLink};
pub use slug_generator::SlugGenerator;
