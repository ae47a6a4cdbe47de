//! Domain layer containing business entities and contracts.
//!
//! This module defines entities, the store interface, and the in-process event
//! stream independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`events`] - Link lifecycle events and their broadcast bus
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod events;
pub mod repositories;
