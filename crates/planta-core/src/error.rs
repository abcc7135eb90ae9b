// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authorization error taxonomy.
//!
//! Every failure here is terminal for the request that produced it. Only
//! `StoreUnavailable` is worth retrying, and only at the HTTP transport
//! level by the caller — never inside the pipeline.

use thiserror::Error;

// =============================================================================
// AuthError
// =============================================================================

/// Failures produced by the authentication gate and the permission evaluator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The request carried no `Authorization: Bearer <token>` header.
    #[error("missing bearer credential")]
    MissingCredential,

    /// The bearer token failed verification (expired, tampered or malformed).
    ///
    /// The token codec's finer distinction is collapsed into this single kind
    /// before it leaves the gate; the specific cause is logged server-side
    /// and never surfaced to the client.
    #[error("invalid bearer credential")]
    InvalidCredential,

    /// The token decoded to a user id the credential store does not know.
    #[error("unknown identity: user {user_id}")]
    UnknownIdentity {
        /// The decoded user id.
        user_id: i64,
    },

    /// The user exists but is flagged inactive.
    #[error("inactive identity: user {user_id}")]
    InactiveIdentity {
        /// The decoded user id.
        user_id: i64,
    },

    /// The credential store could not be reached or timed out.
    #[error("credential store unavailable: {reason}")]
    StoreUnavailable {
        /// Operator-facing description of the fault.
        reason: String,
    },

    /// An authorization check ran without an authenticated session.
    ///
    /// A correctly wired gate makes this unreachable; it indicates a route
    /// mounted outside the authentication layer.
    #[error("authorization check without an authenticated session")]
    NoIdentity,

    /// The authenticated user has no roles at all.
    ///
    /// Distinct from a plain denial: this is a provisioning gap, not a
    /// request for something the user was refused.
    #[error("user has no roles assigned")]
    NoRoles,

    /// Roles exist but none of them carries the required permission.
    #[error("permission denied: {required}")]
    PermissionDenied {
        /// The permission name the operation required.
        required: String,
    },
}

impl AuthError {
    /// Returns a stable code for categorization in logs and responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::InvalidCredential => "INVALID_CREDENTIAL",
            AuthError::UnknownIdentity { .. } => "UNKNOWN_IDENTITY",
            AuthError::InactiveIdentity { .. } => "INACTIVE_IDENTITY",
            AuthError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            AuthError::NoIdentity => "NO_IDENTITY",
            AuthError::NoRoles => "NO_ROLES",
            AuthError::PermissionDenied { .. } => "PERMISSION_DENIED",
        }
    }

    /// Returns `true` if the failure happened before identity was established.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::InvalidCredential
                | AuthError::UnknownIdentity { .. }
                | AuthError::InactiveIdentity { .. }
                | AuthError::NoIdentity
        )
    }

    /// Returns `true` if a transport-level retry of the same request could
    /// succeed. True only for `StoreUnavailable`; every other kind is
    /// permanent for the given credential.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::StoreUnavailable { .. })
    }
}

// =============================================================================
// StoreError
// =============================================================================

/// Infrastructure faults reported by a credential store implementation.
///
/// "User not found" is not an error: lookups return `Option`. This type is
/// reserved for the store itself misbehaving.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed (connection refused, query error, ...).
    #[error("credential store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::MissingCredential.code(), "MISSING_CREDENTIAL");
        assert_eq!(
            AuthError::PermissionDenied {
                required: "ver_lineas".to_string()
            }
            .code(),
            "PERMISSION_DENIED"
        );
    }

    #[test]
    fn test_only_store_unavailable_is_retryable() {
        assert!(AuthError::StoreUnavailable {
            reason: "timeout".to_string()
        }
        .is_retryable());

        assert!(!AuthError::InvalidCredential.is_retryable());
        assert!(!AuthError::NoRoles.is_retryable());
        assert!(!AuthError::PermissionDenied {
            required: "x".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_authentication_vs_authorization() {
        assert!(AuthError::MissingCredential.is_authentication_failure());
        assert!(AuthError::InactiveIdentity { user_id: 7 }.is_authentication_failure());
        assert!(!AuthError::NoRoles.is_authentication_failure());
        assert!(!AuthError::PermissionDenied {
            required: "x".to_string()
        }
        .is_authentication_failure());
    }
}
