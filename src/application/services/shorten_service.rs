//! Link creation service.

use std::sync::Arc;

use crate::application::services::SlugGenerator;
use crate::domain::entities::NewLink;
use crate::domain::events::{EventBus, LinkEvent};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;
use crate::utils::pin::is_valid_pin;
use crate::utils::request_origin::short_url;
use crate::utils::url_validation::validate_original_url;
use serde_json::json;

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub slug: String,
    pub short_url: String,
}

/// Service for creating short links.
///
/// Validates input before any store call, allocates a slug and persists the
/// record with an insert that never overwrites.
pub struct ShortenService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    slug_generator: SlugGenerator<L>,
    pin_mode_enabled: bool,
    events: EventBus,
}

impl<L: LinkRepository + ?Sized> ShortenService<L> {
    /// Creates a new shortening service.
    pub fn new(
        link_repository: Arc<L>,
        slug_generator: SlugGenerator<L>,
        pin_mode_enabled: bool,
        events: EventBus,
    ) -> Self {
        Self {
            link_repository,
            slug_generator,
            pin_mode_enabled,
            events,
        }
    }

    /// Shortens `original_url`, optionally protected by a PIN.
    ///
    /// `origin` is the public `scheme://host[:port]` of the current request and
    /// prefixes the returned short URL. An empty PIN counts as no PIN.
    ///
    /// # Insert races
    ///
    /// If another request claims the allocated slug between the existence check
    /// and the insert, the store reports `AlreadyExists` and a new candidate is
    /// drawn. Store collisions and lost races share one budget of
    /// `max_attempts` candidates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - The URL is empty or not an absolute URI with scheme and host
    /// - A PIN is given while PIN mode is disabled
    /// - The PIN is not 4 to 6 digits
    ///
    /// Returns [`AppError::SlugExhausted`] if no free slug was found.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(
        &self,
        original_url: &str,
        pin: Option<String>,
        origin: &str,
    ) -> Result<ShortenedLink, AppError> {
        let original_url = validate_original_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL provided", json!({ "reason": e.to_string() }))
        })?;

        let pin = self.validate_pin(pin)?;

        let new_link = |slug: String| NewLink {
            slug,
            original_url: original_url.to_string(),
            pin: pin.clone(),
        };

        for attempt in 1..=self.slug_generator.max_attempts() {
            let Some(slug) = self.slug_generator.free_candidate().await? else {
                continue;
            };

            match self.link_repository.insert_if_absent(new_link(slug)).await? {
                InsertOutcome::Inserted(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    self.events.publish(LinkEvent::Shortened {
                        slug: link.slug.clone(),
                    });

                    return Ok(ShortenedLink {
                        short_url: short_url(origin, &link.slug),
                        slug: link.slug,
                    });
                }
                InsertOutcome::AlreadyExists => {
                    tracing::warn!(attempt, "Slug claimed concurrently, retrying");
                }
            }
        }

        Err(self.slug_generator.exhausted())
    }

    fn validate_pin(&self, pin: Option<String>) -> Result<Option<String>, AppError> {
        let Some(pin) = pin.filter(|p| !p.is_empty()) else {
            return Ok(None);
        };

        if !self.pin_mode_enabled {
            return Err(AppError::bad_request(
                "PIN protection is disabled on this server.",
                json!({}),
            ));
        }

        if !is_valid_pin(&pin) {
            return Err(AppError::bad_request("PIN must be 4 to 6 digits.", json!({})));
        }

        Ok(Some(pin))
    }
}
