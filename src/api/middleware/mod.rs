//! HTTP middleware and extractors for request processing.
//!
//! Provides caller credential extraction and observability middleware.

pub mod auth;
pub mod tracing;
