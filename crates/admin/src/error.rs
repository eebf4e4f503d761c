//! Unified error handling with Sentry integration, plus the fixed rejection
//! payloads surfaced by the admin authorization gate.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// A fixed, caller-facing rejection record.
///
/// These are passive data values: handlers return them verbatim as JSON with
/// the embedded status code. The admin SPA and any API clients rely on both
/// the message and the numeric `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RejectionPayload {
    /// Human-readable message, surfaced to the user as-is.
    pub error: &'static str,
    /// HTTP status code, duplicated in the body for client convenience.
    pub status: u16,
}

/// Rejection for an authenticated user who is not on the admin allow-list.
pub const NOT_ADMIN: RejectionPayload = RejectionPayload {
    error: "Forbidden: this account does not have admin access.",
    status: 403,
};

/// Rejection for a request with no authenticated user.
pub const NOT_AUTHENTICATED: RejectionPayload = RejectionPayload {
    error: "Unauthorized: please sign in to continue.",
    status: 401,
};

impl IntoResponse for RejectionPayload {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Session(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthError::NotAdmin => StatusCode::FORBIDDEN,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Session(_) => {
                "Internal server error".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    "Invalid credentials".to_string()
                }
                AuthError::NotAdmin => NOT_ADMIN.error.to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                _ => "Authentication error".to_string(),
            },
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_payload_values() {
        assert_eq!(NOT_ADMIN.status, 403);
        assert_eq!(NOT_AUTHENTICATED.status, 401);
        assert!(NOT_ADMIN.error.starts_with("Forbidden"));
        assert!(NOT_AUTHENTICATED.error.starts_with("Unauthorized"));
    }

    #[test]
    fn test_rejection_payload_response_status() {
        assert_eq!(NOT_ADMIN.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            NOT_AUTHENTICATED.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_rejection_payload_serializes_verbatim() {
        let json = serde_json::to_value(NOT_ADMIN).unwrap();
        assert_eq!(json["status"], 403);
        assert_eq!(
            json["error"],
            "Forbidden: this account does not have admin access."
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::NotAdmin)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
