//! Application error type and its HTTP mapping.
//!
//! Every failure carries a stable machine-checkable `code` plus a human-readable
//! message. Storage failures are logged here and surfaced with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    /// Malformed URL, PIN, status or request body.
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    /// The link exists but moderation forbids redirecting to it.
    Blocked { message: String, details: Value },
    /// The caller lacks the admin capability.
    Forbidden { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    InvalidPin { message: String, details: Value },
    /// No free slug was found within the attempt budget.
    SlugExhausted { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn blocked(message: impl Into<String>, details: Value) -> Self {
        Self::Blocked {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_pin(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidPin {
            message: message.into(),
            details,
        }
    }
    pub fn slug_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::SlugExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable error kind exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::Blocked { .. } => "blocked",
            Self::Forbidden { .. } => "forbidden",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidPin { .. } => "invalid_pin",
            Self::SlugExhausted { .. } => "slug_exhausted",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Blocked { .. } | Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Unauthorized { .. } | Self::InvalidPin { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::SlugExhausted { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Blocked { message, .. }
            | Self::Forbidden { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::InvalidPin { message, .. }
            | Self::SlugExhausted { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    fn details(&self) -> &Value {
        match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Blocked { details, .. }
            | Self::Forbidden { details, .. }
            | Self::Unauthorized { details, .. }
            | Self::InvalidPin { details, .. }
            | Self::SlugExhausted { details, .. }
            | Self::Conflict { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.message().to_string(),
            details: self.details().clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        AppError::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}
