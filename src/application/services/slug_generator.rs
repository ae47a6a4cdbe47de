//! Bounded-retry allocation of unused slugs.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::generate_slug;
use serde_json::json;

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Draws random slugs and checks them against the store.
///
/// The existence check is an optimization that keeps the common case to one
/// insert. It is racy under concurrency; the store's insert-if-absent is what
/// actually guarantees uniqueness.
pub struct SlugGenerator<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    length: usize,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> SlugGenerator<L> {
    pub fn new(link_repository: Arc<L>, length: usize, max_attempts: usize) -> Self {
        Self {
            link_repository,
            length,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates one candidate without consulting the store.
    pub fn generate(&self) -> String {
        generate_slug(self.length)
    }

    /// Draws one candidate and returns it if the store does not hold it yet.
    ///
    /// Returns `Ok(None)` on a collision. Each call is one attempt against the
    /// caller's budget of [`Self::max_attempts`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn free_candidate(&self) -> Result<Option<String>, AppError> {
        let candidate = self.generate();

        if self.link_repository.exists(&candidate).await? {
            tracing::debug!(slug = %candidate, "Slug collision");
            return Ok(None);
        }

        Ok(Some(candidate))
    }

    /// The error reported once every attempt was spent.
    pub fn exhausted(&self) -> AppError {
        tracing::warn!(
            attempts = self.max_attempts,
            length = self.length,
            "Could not find a free slug"
        );

        AppError::slug_exhausted(
            "Could not generate a unique short URL. Please try again.",
            json!({ "attempts": self.max_attempts }),
        )
    }
}
