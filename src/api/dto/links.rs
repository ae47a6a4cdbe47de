//! DTOs for slug resolution and lookup endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{LinkDetails, ResolvedLink};

/// Body of `GET /api/links/{slug}`.
///
/// Untagged, so a protected link serializes as `{"slug": ..., "protected": true}`
/// with no URL.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResolveResponse {
    #[serde(rename_all = "camelCase")]
    Resolved {
        slug: String,
        short_url: String,
        original_url: String,
        click_count: i64,
        created_at: DateTime<Utc>,
        is_safe: bool,
        protected: bool,
    },
    PinRequired { slug: String, protected: bool },
}

impl ResolveResponse {
    pub fn resolved(link: ResolvedLink, short_url: String) -> Self {
        Self::Resolved {
            slug: link.slug,
            short_url,
            original_url: link.original_url,
            click_count: link.click_count,
            created_at: link.created_at,
            is_safe: link.is_safe,
            protected: false,
        }
    }

    pub fn pin_required(slug: String) -> Self {
        Self::PinRequired {
            slug,
            protected: true,
        }
    }
}

/// Body of `GET /api/links/{slug}/info`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetailsResponse {
    pub slug: String,
    pub protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    pub click_count: i64,
    pub is_safe: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LinkDetails> for LinkDetailsResponse {
    fn from(details: LinkDetails) -> Self {
        Self {
            slug: details.slug,
            protected: details.protected,
            original_url: details.original_url,
            click_count: details.click_count,
            is_safe: details.is_safe,
            created_at: details.created_at,
        }
    }
}
