//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::{ModerationStatus, Report};

/// A shortened URL with its moderation state and click counter.
///
/// `status == None` means the link was never moderated. `pin` is the legacy
/// plain-text PIN and must never be exposed through an API response.
#[derive(Debug, Clone)]
pub struct Link {
    pub slug: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub status: Option<ModerationStatus>,
    pub click_count: i64,
    pub reports: Vec<Report>,
    pub pin: Option<String>,
}

impl Link {
    /// Creates a freshly shortened link with no moderation history.
    pub fn new(
        slug: String,
        original_url: String,
        created_at: DateTime<Utc>,
        pin: Option<String>,
    ) -> Self {
        Self {
            slug,
            original_url,
            created_at,
            status: None,
            click_count: 0,
            reports: Vec::new(),
            pin,
        }
    }

    /// Returns true if moderation forbids redirecting to this link.
    pub fn is_blocked(&self) -> bool {
        self.status.is_some_and(|s| s.is_blocked())
    }

    pub fn is_safe(&self) -> bool {
        !self.is_blocked()
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    /// Timestamp of the most recent report, if any.
    pub fn last_reported_at(&self) -> Option<DateTime<Utc>> {
        self.reports.iter().map(|r| r.reported_at).max()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: String,
    pub original_url: String,
    pub pin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link() -> Link {
        Link::new(
            "AbC12".to_string(),
            "https://example.com/page".to_string(),
            Utc::now(),
            None,
        )
    }

    #[test]
    fn test_new_link_is_unmoderated() {
        let link = sample_link();

        assert_eq!(link.slug, "AbC12");
        assert!(link.status.is_none());
        assert_eq!(link.click_count, 0);
        assert!(link.reports.is_empty());
        assert!(link.is_safe());
        assert!(!link.has_pin());
    }

    #[test]
    fn test_only_blocked_is_unsafe() {
        let mut link = sample_link();

        link.status = Some(ModerationStatus::Pending);
        assert!(link.is_safe());

        link.status = Some(ModerationStatus::Approved);
        assert!(link.is_safe());

        link.status = Some(ModerationStatus::Blocked);
        assert!(link.is_blocked());
        assert!(!link.is_safe());
    }

    #[test]
    fn test_reports_do_not_block() {
        let mut link = sample_link();
        link.reports.push(Report {
            reported_at: Utc::now(),
            reason: Some("spam".to_string()),
        });

        assert!(link.is_safe());
    }

    #[test]
    fn test_last_reported_at_picks_latest() {
        let mut link = sample_link();
        assert!(link.last_reported_at().is_none());

        let earlier = Utc::now() - Duration::hours(2);
        let later = Utc::now();
        link.reports.push(Report {
            reported_at: later,
            reason: None,
        });
        link.reports.push(Report {
            reported_at: earlier,
            reason: None,
        });

        assert_eq!(link.last_reported_at(), Some(later));
    }
}
