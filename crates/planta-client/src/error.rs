// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client error types.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced by the client session context.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request.
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The server's localized message.
        message: String,
    },

    /// The server could not be reached.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token cache could not be read or written.
    #[error("token cache error: {0}")]
    Cache(#[from] std::io::Error),

    /// The server answered with a body the client does not understand.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// No session is active.
    #[error("no active session")]
    NotLoggedIn,
}

impl ClientError {
    /// Returns `true` when the server rejected the credential itself, as
    /// opposed to failing for transport or server-side reasons.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { status: 401, .. })
    }
}
