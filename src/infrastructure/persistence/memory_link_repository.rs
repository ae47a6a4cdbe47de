//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{Link, ModerationStatus, NewLink, NewReport};
use crate::domain::repositories::{
    AppendReportOutcome, InsertOutcome, LinkRepository, UpdateOutcome,
};
use crate::error::AppError;

/// Process-local store keyed by slug.
///
/// Every mutation runs while holding the shard lock of a single entry, which
/// gives the same per-call atomicity as the PostgreSQL store. Data is lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        match self.links.entry(new_link.slug.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(vacant) => {
                let link = Link::new(new_link.slug, new_link.original_url, Utc::now(), new_link.pin);
                vacant.insert(link.clone());
                Ok(InsertOutcome::Inserted(link))
            }
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(slug).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.links.contains_key(slug))
    }

    async fn update_status(
        &self,
        slug: &str,
        status: ModerationStatus,
    ) -> Result<UpdateOutcome, AppError> {
        let Some(mut link) = self.links.get_mut(slug) else {
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            });
        };

        if link.status == Some(status) {
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        }

        link.status = Some(status);
        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }

    async fn increment_clicks(&self, slug: &str) -> Result<Option<i64>, AppError> {
        let Some(mut link) = self.links.get_mut(slug) else {
            return Ok(None);
        };

        if link.is_blocked() {
            return Ok(None);
        }

        link.click_count += 1;
        Ok(Some(link.click_count))
    }

    async fn append_report(
        &self,
        slug: &str,
        report: NewReport,
    ) -> Result<AppendReportOutcome, AppError> {
        let Some(mut link) = self.links.get_mut(slug) else {
            return Ok(AppendReportOutcome::NotFound);
        };

        if link.is_blocked() {
            return Ok(AppendReportOutcome::AlreadyBlocked);
        }

        let previous_status = link.status;
        link.reports.push(report.into());
        link.status = Some(ModerationStatus::Pending);

        Ok(AppendReportOutcome::Appended { previous_status })
    }

    async fn list_reported(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let mut reported: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| !entry.reports.is_empty() || entry.status.is_some())
            .map(|entry| entry.value().clone())
            .collect();

        // Option orders None before Some, so comparing b to a puts unreported links last.
        reported.sort_by(|a, b| {
            b.last_reported_at()
                .cmp(&a.last_reported_at())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        reported.truncate(limit.max(0) as usize);

        Ok(reported)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
