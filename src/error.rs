//! Application error taxonomy and HTTP response mapping.
//!
//! Every failure path in the service funnels into [`AppError`], which renders
//! as a JSON body of the shape `{"error": {"code", "message", "details"}}`.
//! Store-level failures are logged server-side and surfaced as a generic
//! internal error; the caller never sees driver detail.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Service-wide error type.
///
/// `Conflict` maps to 400 rather than 409: duplicate usernames, emails and
/// slugs are user-correctable input, reported with the same status as any
/// other validation failure. `NotModified` renders as a bodiless 304.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("not modified")]
    NotModified,
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
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
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                let body = ErrorBody {
                    error: ErrorInfo {
                        code: "unauthorized",
                        message,
                        details,
                    },
                };
                // Challenge on 401 per RFC 6750.
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(body),
                )
                    .into_response();
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::NotModified => return StatusCode::NOT_MODIFIED.into_response(),
            AppError::Conflict { message, details } => {
                (StatusCode::BAD_REQUEST, "conflict", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// User-facing message for a duplicate username.
pub const USERNAME_TAKEN: &str = "username already taken.";
/// User-facing message for a duplicate email address.
pub const EMAIL_TAKEN: &str = "email address already exists.";
/// User-facing message for a duplicate slug.
pub const SLUG_TAKEN: &str = "slug already taken.";

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                let message = match db.constraint() {
                    Some("users_username_key") => USERNAME_TAKEN,
                    Some("users_email_key") => EMAIL_TAKEN,
                    Some("urls_slug_key") => SLUG_TAKEN,
                    _ => "unique constraint violation",
                };
                return AppError::conflict(message, json!({ "constraint": db.constraint() }));
            }
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("Please try again after sometime", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "invalid request".to_string());

        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request(message, details)
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        tracing::error!(error = %e, "revocation ledger error");
        AppError::internal("Please try again after sometime", json!({}))
    }
}
