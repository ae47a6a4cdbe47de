//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures of the shortening
//! service. Entities are plain data structures with only small helpers attached.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping together with its moderation state
//! - [`Report`] - A user-submitted flag against a link
//! - [`ModerationStatus`] - Review classification gating redirection
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewLink`, `NewReport` - For creating new records

pub mod link;
pub mod moderation_status;
pub mod report;

pub use link::{Link, NewLink};
pub use moderation_status::{ModerationStatus, ParseStatusError};
pub use report::{NewReport, Report};
