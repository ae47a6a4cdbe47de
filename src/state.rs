//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AdminAuthorizer, AdminCredentials, AuthService, ModerationService, ResolveService,
    ShortenService, SlugGenerator,
};
use crate::config::Config;
use crate::domain::events::EventBus;
use crate::domain::repositories::LinkRepository;

/// Runtime knobs the services need, separated from [`Config`] so tests can
/// build a state without touching the environment.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub public_scheme: String,
    pub pin_mode_enabled: bool,
    pub slug_length: usize,
    pub slug_max_attempts: usize,
    pub admin_credentials: Option<AdminCredentials>,
    pub session_secret: String,
    pub event_capacity: usize,
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        let admin_credentials = match (&config.admin_user, &config.admin_password) {
            (Some(user), Some(password)) => Some(AdminCredentials {
                user: user.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Self {
            public_scheme: config.public_scheme.clone(),
            pin_mode_enabled: config.pin_mode_enabled,
            slug_length: config.slug_length,
            slug_max_attempts: config.slug_max_attempts,
            admin_credentials,
            session_secret: config.admin_session_secret.clone(),
            event_capacity: config.event_capacity,
        }
    }
}

/// Services are generic over the store; the state erases it behind
/// `dyn LinkRepository` so PostgreSQL and in-memory backends share one router.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn LinkRepository>>,
    pub resolve_service: Arc<ResolveService<dyn LinkRepository>>,
    pub moderation_service: Arc<ModerationService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService>,
    pub authorizer: Arc<dyn AdminAuthorizer>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub events: EventBus,
    pub public_scheme: String,
}

impl AppState {
    /// Wires every service onto `link_repository`.
    pub fn new(link_repository: Arc<dyn LinkRepository>, settings: AppSettings) -> Self {
        let events = EventBus::new(settings.event_capacity);

        let slug_generator = SlugGenerator::new(
            link_repository.clone(),
            settings.slug_length,
            settings.slug_max_attempts,
        );

        let shorten_service = Arc::new(ShortenService::new(
            link_repository.clone(),
            slug_generator,
            settings.pin_mode_enabled,
            events.clone(),
        ));
        let resolve_service = Arc::new(ResolveService::new(
            link_repository.clone(),
            settings.pin_mode_enabled,
            events.clone(),
        ));
        let moderation_service = Arc::new(ModerationService::new(
            link_repository.clone(),
            events.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            settings.admin_credentials,
            settings.session_secret,
        ));

        Self {
            shorten_service,
            resolve_service,
            moderation_service,
            authorizer: auth_service.clone(),
            auth_service,
            link_repository,
            events,
            public_scheme: settings.public_scheme,
        }
    }

    /// Swaps the admin check, e.g. for an external identity provider.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn AdminAuthorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    pub fn pin_mode_enabled(&self) -> bool {
        self.resolve_service.pin_mode_enabled()
    }

    /// Whether cookies should carry the `Secure` flag.
    pub fn secure_cookies(&self) -> bool {
        self.public_scheme == "https"
    }
}
