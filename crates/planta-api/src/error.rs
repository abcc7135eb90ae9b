// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and handling.
//!
//! Every error maps to an HTTP status and a `{ "success": false, "message" }`
//! JSON body. The message is what the client shows the user; the detailed
//! cause stays in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planta_core::AuthError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
///
/// This error type is designed to be returned from handlers and middleware
/// and automatically converted to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication or authorization failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Bad request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Resource not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    ///
    /// Authentication failures are 401, authorization failures 403, and a
    /// store fault is a plain 500: the request was well-formed and the
    /// failure is ours.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) if e.is_authentication_failure() => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::StoreUnavailable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Auth(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for categorization.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Auth(e) => e.code(),
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns a user-friendly error message.
    ///
    /// Safe to show to end users. All credential rejections share one
    /// message; a client cannot tell an expired token from a forged one,
    /// or a good guessed username from a bad one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth(AuthError::MissingCredential) => {
                "Se requiere un token de autenticación".to_string()
            }
            ApiError::Auth(
                AuthError::InvalidCredential
                | AuthError::UnknownIdentity { .. }
                | AuthError::InactiveIdentity { .. }
                | AuthError::NoIdentity,
            ) => "Token inválido o sesión expirada".to_string(),
            ApiError::Auth(AuthError::NoRoles) => {
                "El usuario no tiene roles asignados".to_string()
            }
            ApiError::Auth(AuthError::PermissionDenied { .. }) => {
                "No tiene permiso para realizar esta acción".to_string()
            }
            ApiError::Auth(AuthError::StoreUnavailable { .. }) => {
                "Servicio no disponible, intente más tarde".to_string()
            }
            ApiError::BadRequest { message } => message.clone(),
            ApiError::NotFound { resource } => format!("No se encontró: {resource}"),
            ApiError::Internal { .. } => "Error interno del servidor".to_string(),
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // The full cause goes to the log; the body carries only the
        // localized message.
        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Request rejected"
            );
        }

        let body = ErrorResponseBody {
            success: false,
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// Error response body structure: `{ "success": false, "message": "..." }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    /// Always `false` on the error path.
    pub success: bool,
    /// Human-readable, localized error message.
    pub message: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid JSON: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("IO error: {}", err))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_are_401() {
        for err in [
            AuthError::MissingCredential,
            AuthError::InvalidCredential,
            AuthError::UnknownIdentity { user_id: 1 },
            AuthError::InactiveIdentity { user_id: 1 },
            AuthError::NoIdentity,
        ] {
            assert_eq!(ApiError::from(err).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_authorization_failures_are_403() {
        assert_eq!(
            ApiError::from(AuthError::NoRoles).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::PermissionDenied {
                required: "ver_lineas".to_string()
            })
            .status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_store_fault_is_500() {
        let err = ApiError::from(AuthError::StoreUnavailable {
            reason: "timeout".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
    }

    #[test]
    fn test_credential_rejections_share_one_message() {
        let invalid = ApiError::from(AuthError::InvalidCredential).user_message();
        let unknown = ApiError::from(AuthError::UnknownIdentity { user_id: 9 }).user_message();
        let inactive = ApiError::from(AuthError::InactiveIdentity { user_id: 9 }).user_message();

        assert_eq!(invalid, unknown);
        assert_eq!(unknown, inactive);
    }

    #[test]
    fn test_messages_never_leak_identifiers() {
        let err = ApiError::from(AuthError::PermissionDenied {
            required: "eliminar_postes".to_string(),
        });
        assert!(!err.user_message().contains("eliminar_postes"));

        let err = ApiError::from(AuthError::UnknownIdentity { user_id: 42 });
        assert!(!err.user_message().contains("42"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::from(AuthError::MissingCredential).error_code(),
            "MISSING_CREDENTIAL"
        );
        assert_eq!(ApiError::not_found("linea").error_code(), "NOT_FOUND");
        assert_eq!(ApiError::internal("boom").error_code(), "INTERNAL_ERROR");
    }
}
