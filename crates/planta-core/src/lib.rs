// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # planta-core
//!
//! Authorization core for the PLANTA outside-plant inventory platform.
//!
//! This crate provides:
//!
//! - Identity, role and permission records resolved from the credential store
//! - A single normalization shim for legacy association shapes
//! - The request-scoped authenticated session
//! - The pure permission evaluator
//! - Bearer token issuance and verification
//! - The credential store contract and an in-memory implementation
//!
//! The inventory domain itself (lines, cables, plant records) and its
//! persistence live outside this crate; everything here is the allow/deny
//! machinery that gates access to it.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod identity;
pub mod legacy;
pub mod session;
pub mod store;
pub mod token;

pub use error::{AuthError, StoreError};
pub use identity::{PermissionRecord, RoleRecord, UserRecord};
pub use session::AuthSession;
pub use store::{CredentialStore, MemoryCredentialStore};
pub use token::{TokenClaims, TokenCodec, TokenConfig, TokenError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
