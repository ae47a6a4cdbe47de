//! Reporting and admin moderation of short links.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, ModerationStatus, NewReport};
use crate::domain::events::{EventBus, LinkEvent};
use crate::domain::repositories::{AppendReportOutcome, LinkRepository};
use crate::error::AppError;
use crate::utils::slug::is_valid_slug;

pub const DEFAULT_REPORT_LIMIT: i64 = 100;
pub const MAX_REPORT_LIMIT: i64 = 100;
pub const MAX_REASON_LENGTH: usize = 500;

/// Result of a user report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportResult {
    pub message: String,
    pub new_status: ModerationStatus,
    /// False when the link was already blocked and nothing was recorded.
    pub appended: bool,
}

/// Result of an admin status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub message: String,
    pub status: ModerationStatus,
    pub changed: bool,
}

pub struct ModerationService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    events: EventBus,
}

impl<L: LinkRepository + ?Sized> ModerationService<L> {
    pub fn new(link_repository: Arc<L>, events: EventBus) -> Self {
        Self {
            link_repository,
            events,
        }
    }

    /// Records a report and moves the link to `pending`.
    ///
    /// Reporting a blocked link is a no-op: no report is appended and the
    /// status stays `blocked`. The reason is trimmed; an empty reason is
    /// stored as absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the reason exceeds 500 characters
    /// - [`AppError::NotFound`] if the slug is unknown
    pub async fn report(&self, slug: &str, reason: Option<&str>) -> Result<ReportResult, AppError> {
        let reason = normalize_reason(reason)?;

        if !is_valid_slug(slug) {
            return Err(not_found(slug));
        }

        let outcome = self
            .link_repository
            .append_report(slug, NewReport::now(reason))
            .await?;

        match outcome {
            AppendReportOutcome::NotFound => Err(not_found(slug)),
            AppendReportOutcome::AlreadyBlocked => {
                tracing::info!(slug, "Report ignored, link already blocked");
                Ok(ReportResult {
                    message: format!("URL /{slug} is already blocked. No new report added."),
                    new_status: ModerationStatus::Blocked,
                    appended: false,
                })
            }
            AppendReportOutcome::Appended { previous_status } => {
                metrics::counter!("reports_total").increment(1);
                self.events.publish(LinkEvent::Reported {
                    slug: slug.to_string(),
                    previous_status,
                });

                let message = match previous_status {
                    Some(ModerationStatus::Pending) => {
                        format!("Additional report for /{slug} submitted. It is still pending review.")
                    }
                    Some(ModerationStatus::Approved) => format!(
                        "Report for /{slug} (previously approved) submitted. It is now pending review."
                    ),
                    _ => format!("Report for /{slug} submitted successfully. It will be reviewed."),
                };

                Ok(ReportResult {
                    message,
                    new_status: ModerationStatus::Pending,
                    appended: true,
                })
            }
        }
    }

    /// Sets the moderation status of a link. Admin only.
    ///
    /// The admin check comes first, so a non-admin caller never reaches the
    /// store. Setting the current status again succeeds with `changed = false`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if `caller_is_admin` is false
    /// - [`AppError::Validation`] if `new_status` is not pending, approved or blocked
    /// - [`AppError::NotFound`] if the slug is unknown
    pub async fn set_status(
        &self,
        slug: &str,
        new_status: &str,
        caller_is_admin: bool,
    ) -> Result<StatusChange, AppError> {
        require_admin(slug, caller_is_admin)?;

        let status = new_status.parse::<ModerationStatus>().map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "status": new_status }))
        })?;

        if !is_valid_slug(slug) {
            return Err(not_found(slug));
        }

        let outcome = self.link_repository.update_status(slug, status).await?;

        if outcome.is_not_found() {
            return Err(not_found(slug));
        }

        if outcome.is_unchanged() {
            return Ok(StatusChange {
                message: format!("Status for /{slug} is already {status}. No change made."),
                status,
                changed: false,
            });
        }

        metrics::counter!("status_changes_total").increment(1);
        tracing::info!(slug, %status, "Moderation status updated");
        self.events.publish(LinkEvent::StatusChanged {
            slug: slug.to_string(),
            status,
        });

        Ok(StatusChange {
            message: format!("Status for /{slug} successfully updated to {status}."),
            status,
            changed: true,
        })
    }

    /// Lists links with at least one report or a moderation status, most
    /// recently reported first.
    ///
    /// `limit` defaults to 100 and is clamped to `1..=100`.
    pub async fn list_reported(&self, limit: Option<i64>) -> Result<Vec<Link>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_REPORT_LIMIT)
            .clamp(1, MAX_REPORT_LIMIT);

        self.link_repository.list_reported(limit).await
    }
}

/// Refuses a status change by a non-admin caller.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] if `caller_is_admin` is false.
pub fn require_admin(slug: &str, caller_is_admin: bool) -> Result<(), AppError> {
    if !caller_is_admin {
        tracing::warn!(slug, "Non-admin status change refused");
        return Err(AppError::forbidden(
            "Admin privileges are required to change a link status.",
            json!({}),
        ));
    }

    Ok(())
}

fn normalize_reason(reason: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    if reason.chars().count() > MAX_REASON_LENGTH {
        return Err(AppError::bad_request(
            format!("Reason must be at most {MAX_REASON_LENGTH} characters."),
            json!({ "field": "reason" }),
        ));
    }

    Ok(Some(reason.to_string()))
}

fn not_found(slug: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "slug": slug }))
}
