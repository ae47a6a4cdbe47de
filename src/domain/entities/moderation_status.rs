//! Moderation status of a short link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review classification of a link.
///
/// A link with no status at all has never been moderated and redirects the same
/// way an [`ModerationStatus::Approved`] link does. Only [`ModerationStatus::Blocked`]
/// refuses redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Blocked,
}

impl ModerationStatus {
    pub const ALL: [ModerationStatus; 3] = [Self::Pending, Self::Approved, Self::Blocked];

    /// Returns the lowercase wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Blocked => "blocked",
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked)
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `pending`, `approved`, `blocked`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid moderation status '{0}', must be one of: pending, approved, blocked")]
pub struct ParseStatusError(pub String);

impl FromStr for ModerationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "blocked" => Ok(Self::Blocked),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
