// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP API for the planta externa inventory.
//!
//! Wires the authorization core from `planta-core` into an Axum server:
//! the authentication gate runs as a tower layer over every protected
//! route, and each route carries the permission its operation requires.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use config::{ApiConfig, CorsConfig};
pub use error::{ApiError, ApiResult};
pub use middleware::{AuthLayer, PermissionLayer};
pub use response::{ApiResponse, AuthResponse};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::AppState;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
