// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the planta binary.

use thiserror::Error;

/// Result alias for binary operations.
pub type Result<T> = std::result::Result<T, BinError>;

// =============================================================================
// Error Type
// =============================================================================

/// Top-level error for the planta binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What went wrong
        message: String,
    },

    /// Startup initialization failed.
    #[error("Initialization error: {message}")]
    Initialization {
        /// What went wrong
        message: String,
    },

    /// Runtime failure after startup.
    #[error("Runtime error: {message}")]
    Runtime {
        /// What went wrong
        message: String,
    },

    /// Filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced from the API layer.
    #[error(transparent)]
    Api(#[from] planta_api::ApiError),
}

impl BinError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an initialization error.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Create a runtime error.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::Initialization { .. } => 3,
            Self::Io(_) => 4,
            Self::Runtime { .. } | Self::Api(_) => 1,
        }
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// Log an error with full context.
pub fn report_error(error: &BinError) {
    tracing::error!(error = %error, exit_code = error.exit_code(), "fatal error");
    eprintln!("Error: {error}");
}

/// Log an error and terminate the process.
pub fn report_error_and_exit(error: &BinError) -> ! {
    report_error(error);
    std::process::exit(error.exit_code());
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(BinError::configuration("bad").exit_code(), 2);
        assert_eq!(BinError::initialization("bad").exit_code(), 3);
        assert_eq!(BinError::runtime("bad").exit_code(), 1);
        let io = BinError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), 4);
    }

    #[test]
    fn test_display() {
        let err = BinError::configuration("missing secret");
        assert_eq!(err.to_string(), "Configuration error: missing secret");
    }
}
