//! DTOs for reporting and moderation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{Link, ModerationStatus, Report};

#[derive(Debug, Deserialize, Validate)]
pub struct ReportRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,

    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub message: String,
    pub new_status: ModerationStatus,
}

/// Query parameters for listing reported links.
///
/// Uses `serde_with` to parse the limit from the query string.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

/// A link as shown in the moderation queue. The PIN is never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: Option<ModerationStatus>,
    pub click_count: i64,
    pub reports: Vec<Report>,
    pub protected: bool,
}

impl LinkView {
    /// Builds the view. `original_url` is withheld from non-admins for blocked
    /// and protected links.
    pub fn new(link: Link, caller_is_admin: bool, pin_mode_enabled: bool) -> Self {
        let protected = pin_mode_enabled && link.has_pin();
        let reveal = caller_is_admin || !(protected || link.is_blocked());

        Self {
            original_url: reveal.then_some(link.original_url),
            slug: link.slug,
            created_at: link.created_at,
            status: link.status,
            click_count: link.click_count,
            reports: link.reports,
            protected,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub changed: bool,
    pub status: ModerationStatus,
}
