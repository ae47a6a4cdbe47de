//! Slug generation and format checks.
//!
//! Slugs are drawn uniformly from the 62-symbol alphanumeric alphabet
//! (`[A-Za-z0-9]`). There is no sequential scheme; uniqueness is enforced by the
//! store and the bounded retry loop in
//! [`crate::application::services::SlugGenerator`].

use rand::{Rng, distr::Alphanumeric};

/// Slug length used by the legacy deployment.
pub const DEFAULT_SLUG_LENGTH: usize = 5;

/// Upper bound accepted on lookup, independent of the configured issue length.
pub const MAX_SLUG_LENGTH: usize = 64;

/// Generates a random alphanumeric slug of the given length.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug(5);
/// assert_eq!(slug.len(), 5);
/// assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_slug(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `slug` is non-empty, at most [`MAX_SLUG_LENGTH`] long and
/// only alphanumeric ASCII.
///
/// The length is not pinned to the issue length so that links created under an
/// earlier `SLUG_LENGTH` stay resolvable. Lookups reject anything else before
/// touching the store.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LENGTH
        && slug.bytes().all(|b| b.is_ascii_alphanumeric())
}
