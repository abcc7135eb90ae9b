// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Logging initialization and configuration.
//!
//! Sets up the tracing subscriber with the requested level and output
//! format. Respects `RUST_LOG` when present, otherwise applies sane
//! per-crate defaults on top of the requested level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormat;
use crate::error::{BinError, Result};

// =============================================================================
// Logging Initialization
// =============================================================================

/// Initialize the global tracing subscriber.
///
/// Call at most once per process; subsequent calls return an error.
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(level)?;

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => {
            registry
                .with(tracing_subscriber::fmt::layer().with_target(true))
                .try_init()
                .map_err(|e| BinError::initialization(format!("failed to init logging: {e}")))?;
        }
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
                .try_init()
                .map_err(|e| BinError::initialization(format!("failed to init logging: {e}")))?;
        }
        LogFormat::Compact => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_target(false)
                        .without_time(),
                )
                .try_init()
                .map_err(|e| BinError::initialization(format!("failed to init logging: {e}")))?;
        }
    }

    Ok(())
}

/// Build the env filter, preferring `RUST_LOG` over the CLI level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    parse_level(level)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},hyper=warn,tower=warn,axum=info,tokio=info"
        ))
    });

    Ok(filter)
}

/// Validate a log level string.
fn parse_level(level: &str) -> Result<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        other => Err(BinError::configuration(format!(
            "invalid log level '{other}' (expected trace, debug, info, warn or error)"
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            assert!(parse_level(level).is_ok(), "level {level} should be valid");
        }
    }

    #[test]
    fn test_invalid_level() {
        assert!(parse_level("loud").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn test_build_filter() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("bogus").is_err());
    }
}
