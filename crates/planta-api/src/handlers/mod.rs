// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`health`]: liveness and readiness checks
//! - [`auth`]: login, logout and current-user
//! - [`inventory`]: plant inventory resources

mod auth;
mod health;
mod inventory;

pub use auth::*;
pub use health::*;
pub use inventory::*;
