// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! Shared fixtures and mocks for the integration test suites.
//!
//! - `fixtures`: seeded stores, signing codecs and routers
//! - `mocks`: credential store doubles with error injection

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging. Call this at the start of each test module.
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,planta=debug")),
            )
            .with_test_writer()
            .init();
    });
}
