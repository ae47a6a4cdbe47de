//! Store implementations of [`crate::domain::repositories::LinkRepository`].
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL via SQLx, the production store
//! - [`InMemoryLinkRepository`] - process-local store backed by `DashMap`, used
//!   for development and tests

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
