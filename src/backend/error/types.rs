/**
 * Backend Error Types
 *
 * This module defines the error taxonomy used by HTTP handlers and the
 * push channel:
 *
 * - Validation failures carry a field name and become 400 responses
 * - Unknown users/accounts become 404 responses
 * - Missing or invalid sessions become 401 responses
 * - Blocked counterparts become 403 responses
 * - Everything else (store unavailable, unexpected failure) is logged
 *   server-side and surfaces as an opaque 500
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend error taxonomy
///
/// Every handler returns `Result<_, ApiError>`; the `IntoResponse`
/// implementation in `conversion` turns these into JSON error bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input, reported against a single field
    #[error("{message}")]
    Validation {
        /// The offending request field
        field: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// Unknown user or account
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed (e.g. blocked counterpart)
    #[error("{0}")]
    Forbidden(String),

    /// Document store failure; message is never shown to clients
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure; message is never shown to clients
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failure for a named request field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Not-found for an unknown user or account
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Opaque server error with a server-side-only description
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Server errors are always opaque.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::NotFound(message) => message.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::Forbidden(message) => message.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }

    /// The field a validation error is attached to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let error = ApiError::validation("email", "A valid email address is required");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.client_message(), "A valid email address is required");
        assert_eq!(error.field(), Some("email"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ApiError::not_found("Account not found");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.client_message(), "Account not found");
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_server_errors_are_opaque() {
        let error = ApiError::Database(sqlx::Error::PoolClosed);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.client_message(), "Internal Server Error");

        let error = ApiError::internal("bcrypt blew up");
        assert_eq!(error.client_message(), "Internal Server Error");
        assert!(error.field().is_none());
    }
}
