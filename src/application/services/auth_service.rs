//! Admin authentication for moderation endpoints.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying the admin session token.
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Credentials presented by the caller of a request.
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub bearer_token: Option<String>,
    pub session_cookie: Option<String>,
}

/// Decides whether a caller holds the admin capability.
pub trait AdminAuthorizer: Send + Sync {
    fn is_admin(&self, caller: &CallerContext) -> bool;
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub user: String,
    pub password: String,
}

/// Checks admin credentials and issues session tokens.
///
/// The session token is an HMAC-SHA256 of the admin user keyed by
/// `session_secret`, hex encoded. It is stateless: rotating the secret or the
/// admin user invalidates every issued session.
pub struct AuthService {
    credentials: Option<AdminCredentials>,
    session_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `credentials` - admin user and password, `None` disables admin login
    /// - `session_secret` - HMAC key for session tokens
    pub fn new(credentials: Option<AdminCredentials>, session_secret: String) -> Self {
        Self {
            credentials,
            session_secret,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Session token for the configured admin, if any.
    pub fn session_token(&self) -> Option<String> {
        self.credentials
            .as_ref()
            .map(|creds| self.sign(&creds.user))
    }

    fn sign(&self, user: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.session_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(user.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies admin credentials and returns a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no admin credentials are configured.
    /// Returns [`AppError::Unauthorized`] if user or password do not match.
    pub fn login(&self, user: &str, password: &str) -> Result<String, AppError> {
        let Some(creds) = self.credentials.as_ref() else {
            tracing::error!("Admin login attempted but ADMIN_USER/ADMIN_PASSWORD are not set");
            return Err(AppError::internal(
                "Admin authentication is not configured on the server.",
                json!({}),
            ));
        };

        let user_ok = creds.user.as_bytes().ct_eq(user.as_bytes());
        let password_ok = creds.password.as_bytes().ct_eq(password.as_bytes());

        if !bool::from(user_ok & password_ok) {
            tracing::warn!("Failed admin login");
            return Err(AppError::unauthorized(
                "Invalid admin credentials.",
                json!({}),
            ));
        }

        tracing::info!("Admin logged in");
        Ok(self.sign(&creds.user))
    }
}

impl AdminAuthorizer for AuthService {
    fn is_admin(&self, caller: &CallerContext) -> bool {
        let Some(expected) = self.session_token() else {
            return false;
        };

        [caller.session_cookie.as_deref(), caller.bearer_token.as_deref()]
            .into_iter()
            .flatten()
            .any(|presented| bool::from(expected.as_bytes().ct_eq(presented.as_bytes())))
    }
}
