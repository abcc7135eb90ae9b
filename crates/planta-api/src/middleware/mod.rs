// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! Two layers cover the whole authorization path:
//!
//! - [`AuthLayer`]: bearer token authentication, one store fetch per request
//! - [`PermissionLayer`]: per-route permission enforcement

mod auth;
mod permission;

pub use auth::{AuthLayer, AuthMiddleware};
pub use permission::{PermissionLayer, PermissionMiddleware};
