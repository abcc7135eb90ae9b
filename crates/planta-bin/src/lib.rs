// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # planta-bin
//!
//! Command-line entry point for the planta inventory server. Wires
//! together configuration loading, logging, the credential store and
//! the API server, with graceful shutdown on OS signals.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use cli::{Cli, Commands, LogFormat};
pub use config::{AppConfig, SeedConfig};
pub use error::{BinError, Result};
pub use shutdown::ShutdownCoordinator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
