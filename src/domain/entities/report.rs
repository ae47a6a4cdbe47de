//! Report entity: a user flag raised against a short link.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single report recorded against a link.
///
/// Reports are append-only; the list on a [`crate::domain::entities::Link`] only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub reported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Input data for appending a report. The timestamp is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub reported_at: DateTime<Utc>,
    pub reason: Option<String>,
}

impl NewReport {
    /// Creates a report stamped with the current time.
    pub fn now(reason: Option<String>) -> Self {
        Self {
            reported_at: Utc::now(),
            reason,
        }
    }
}

impl From<NewReport> for Report {
    fn from(new: NewReport) -> Self {
        Self {
            reported_at: new.reported_at,
            reason: new.reason,
        }
    }
}
