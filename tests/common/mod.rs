#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use stellar_link::application::services::AdminCredentials;
use stellar_link::domain::repositories::LinkRepository;
use stellar_link::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use stellar_link::routes::router;
use stellar_link::state::{AppSettings, AppState};

pub const HOST: &str = "s.example.com";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub fn test_settings(pin_mode_enabled: bool) -> AppSettings {
    AppSettings {
        public_scheme: "http".to_string(),
        pin_mode_enabled,
        slug_length: 5,
        slug_max_attempts: 5,
        admin_credentials: Some(AdminCredentials {
            user: ADMIN_USER.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
        session_secret: "test-session-secret".to_string(),
        event_capacity: 64,
    }
}

pub fn create_test_state(pin_mode_enabled: bool) -> AppState {
    let repo: Arc<dyn LinkRepository> = Arc::new(InMemoryLinkRepository::new());
    AppState::new(repo, test_settings(pin_mode_enabled))
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let repo: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(repo, test_settings(true))
}

pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Session token the test admin receives on login.
pub fn admin_token(state: &AppState) -> String {
    state.auth_service.session_token().unwrap()
}

/// Shortens `url` through the API and returns the new slug.
pub async fn shorten(server: &TestServer, url: &str, pin: Option<&str>) -> String {
    let mut body = json!({ "originalUrl": url });
    if let Some(pin) = pin {
        body["pin"] = json!(pin);
    }

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&body)
        .await;
    response.assert_status_ok();

    response.json::<Value>()["slug"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn set_status(server: &TestServer, token: &str, slug: &str, status: &str) {
    server
        .put(&format!("/api/reports/{slug}/status"))
        .authorization_bearer(token)
        .json(&json!({ "status": status }))
        .await
        .assert_status_ok();
}
