//! Slug resolution: redirect decisions, PIN verification and read-only lookups.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::Link;
use crate::domain::events::{EventBus, LinkEvent};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::pin::{is_valid_pin, pins_match};
use crate::utils::slug::is_valid_slug;

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub slug: String,
    pub original_url: String,
    /// Click count after this resolution was counted.
    pub click_count: i64,
    pub is_safe: bool,
    pub created_at: DateTime<Utc>,
}

/// Outcome of resolving a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    Redirect(ResolvedLink),
    /// The link is PIN protected; the caller must go through [`ResolveService::verify_pin`].
    PinRequired { slug: String },
}

/// Whether a slug needs a PIN before it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkInfo {
    pub protected: bool,
}

/// Read-only view of a link. `original_url` is withheld for protected links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDetails {
    pub slug: String,
    pub protected: bool,
    pub original_url: Option<String>,
    pub click_count: i64,
    pub is_safe: bool,
    pub created_at: DateTime<Utc>,
}

pub struct ResolveService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    pin_mode_enabled: bool,
    events: EventBus,
}

impl<L: LinkRepository + ?Sized> ResolveService<L> {
    pub fn new(link_repository: Arc<L>, pin_mode_enabled: bool, events: EventBus) -> Self {
        Self {
            link_repository,
            pin_mode_enabled,
            events,
        }
    }

    pub fn pin_mode_enabled(&self) -> bool {
        self.pin_mode_enabled
    }

    /// Decides how a visit to `slug` is answered.
    ///
    /// Only a [`RedirectDecision::Redirect`] counts a click.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for unknown or malformed slugs
    /// - [`AppError::Blocked`] if moderation blocked the link
    /// - [`AppError::Internal`] on storage errors
    pub async fn resolve(&self, slug: &str) -> Result<RedirectDecision, AppError> {
        let link = self.load_redirectable(slug).await?;

        if self.is_protected(&link) {
            tracing::debug!(slug = %link.slug, "PIN required");
            return Ok(RedirectDecision::PinRequired { slug: link.slug });
        }

        self.count_resolution(link).await.map(RedirectDecision::Redirect)
    }

    /// Checks `submitted_pin` and, on success, counts the resolution.
    ///
    /// A link that is not protected (no PIN, or PIN mode disabled) resolves
    /// as if unprotected, whatever PIN is submitted.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the PIN is not 4 to 6 digits
    /// - [`AppError::NotFound`] / [`AppError::Blocked`] as for [`resolve`](Self::resolve)
    /// - [`AppError::InvalidPin`] on mismatch
    pub async fn verify_pin(&self, slug: &str, submitted_pin: &str) -> Result<ResolvedLink, AppError> {
        if !is_valid_pin(submitted_pin) {
            return Err(AppError::bad_request(
                "Valid PIN (4-6 digits) is required",
                json!({}),
            ));
        }

        let link = self.load_redirectable(slug).await?;

        if self.is_protected(&link)
            && let Some(stored) = link.pin.as_deref()
            && !pins_match(stored, submitted_pin)
        {
            metrics::counter!("redirects_refused_total", "reason" => "invalid_pin").increment(1);
            tracing::info!(slug = %link.slug, "PIN mismatch");
            return Err(AppError::invalid_pin("Invalid PIN", json!({})));
        }

        self.count_resolution(link).await
    }

    /// Reports whether `slug` is PIN protected. No side effect.
    pub async fn info(&self, slug: &str) -> Result<LinkInfo, AppError> {
        let link = self.load_redirectable(slug).await?;

        Ok(LinkInfo {
            protected: self.is_protected(&link),
        })
    }

    /// Read-only lookup. Does not count a click.
    pub async fn details(&self, slug: &str) -> Result<LinkDetails, AppError> {
        let link = self.load_redirectable(slug).await?;
        let protected = self.is_protected(&link);

        Ok(LinkDetails {
            protected,
            original_url: (!protected).then(|| link.original_url.clone()),
            click_count: link.click_count,
            is_safe: link.is_safe(),
            created_at: link.created_at,
            slug: link.slug,
        })
    }

    fn is_protected(&self, link: &Link) -> bool {
        self.pin_mode_enabled && link.has_pin()
    }

    /// Loads a link that exists and is not blocked.
    async fn load_redirectable(&self, slug: &str) -> Result<Link, AppError> {
        if !is_valid_slug(slug) {
            return Err(not_found(slug));
        }

        let link = self
            .link_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found(slug))?;

        if link.is_blocked() {
            return Err(blocked(slug));
        }

        Ok(link)
    }

    async fn count_resolution(&self, link: Link) -> Result<ResolvedLink, AppError> {
        let Some(click_count) = self.link_repository.increment_clicks(&link.slug).await? else {
            // Removed or blocked since it was read.
            return match self.link_repository.find_by_slug(&link.slug).await? {
                Some(current) if current.is_blocked() => Err(blocked(&link.slug)),
                _ => Err(not_found(&link.slug)),
            };
        };

        metrics::counter!("redirects_total").increment(1);
        self.events.publish(LinkEvent::Resolved {
            slug: link.slug.clone(),
            click_count,
        });

        Ok(ResolvedLink {
            is_safe: link.is_safe(),
            slug: link.slug,
            original_url: link.original_url,
            click_count,
            created_at: link.created_at,
        })
    }
}

fn not_found(slug: &str) -> AppError {
    metrics::counter!("redirects_refused_total", "reason" => "not_found").increment(1);
    AppError::not_found("URL not found", json!({ "slug": slug }))
}

fn blocked(slug: &str) -> AppError {
    metrics::counter!("redirects_refused_total", "reason" => "blocked").increment(1);
    tracing::info!(slug, "Refused blocked link");
    AppError::blocked("This URL has been blocked.", json!({ "slug": slug }))
}
