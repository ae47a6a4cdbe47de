//! Repository trait for short link data access.

use crate::domain::entities::{Link, ModerationStatus, NewLink, NewReport};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of an insert-if-absent call.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(Link),
    /// A record with the same slug already exists; nothing was written.
    AlreadyExists,
}

/// Result of a conditional field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

impl UpdateOutcome {
    pub fn is_not_found(&self) -> bool {
        self.matched == 0
    }

    pub fn is_unchanged(&self) -> bool {
        self.matched > 0 && self.modified == 0
    }
}

/// Result of the combined report-append and status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendReportOutcome {
    NotFound,
    /// The link is blocked; no report was appended and the status is unchanged.
    AlreadyBlocked,
    /// The report was appended and the status set to `pending`.
    Appended {
        previous_status: Option<ModerationStatus>,
    },
}

/// Store interface for short links.
///
/// Every method is a single atomic operation from the caller's perspective.
/// Services never perform read-modify-write sequences on top of it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link unless the slug is already taken.
    ///
    /// Never overwrites an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Finds a link, including its reports, by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Checks whether a slug is already in use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Sets the moderation status of a link.
    ///
    /// `matched == 0` means the slug is unknown. `modified == 0` with a match
    /// means the link already had this status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update_status(
        &self,
        slug: &str,
        status: ModerationStatus,
    ) -> Result<UpdateOutcome, AppError>;

    /// Atomically increments the click counter of a non-blocked link.
    ///
    /// Returns the post-increment value, or `None` if the slug is unknown or the
    /// link is blocked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, slug: &str) -> Result<Option<i64>, AppError>;

    /// Appends a report and marks the link `pending` as one atomic update.
    ///
    /// Blocked links are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn append_report(
        &self,
        slug: &str,
        report: NewReport,
    ) -> Result<AppendReportOutcome, AppError>;

    /// Lists links that have at least one report or a defined status.
    ///
    /// Ordered by most recent report descending, links without reports last,
    /// ties broken by `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_reported(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
