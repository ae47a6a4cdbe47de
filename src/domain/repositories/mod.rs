//! Repository trait definitions for the domain layer.
//!
//! This module defines the store interface that abstracts data access for short
//! links. The trait is implemented by concrete stores in the infrastructure layer.
//!
//! # Architecture
//!
//! - The trait defines the contract, including per-call atomicity guarantees
//! - Implementations live in `crate::infrastructure::persistence`
//! - A mock implementation is auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;

pub use link_repository::{AppendReportOutcome, InsertOutcome, LinkRepository, UpdateOutcome};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
