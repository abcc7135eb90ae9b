// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client-side session context for the planta externa inventory API.
//!
//! Logs in against the server, caches the bearer token between runs, and
//! mirrors the user's permissions so a UI can hide unavailable actions.
//! Every mirror answer is advisory; the server is the deciding authority.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cache;
pub mod context;
pub mod error;
pub mod transport;

pub use cache::TokenCache;
pub use context::SessionContext;
pub use error::{ClientError, ClientResult};
pub use transport::{HttpSessionTransport, IssuedToken, Profile, SessionTransport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
