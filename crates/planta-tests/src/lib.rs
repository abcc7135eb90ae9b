// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Planta Integration Tests
//!
//! End-to-end tests for the planta externa inventory workspace:
//! token issuance and verification, the authentication middleware,
//! per-route permission enforcement, legacy data ingestion and the
//! client-side session mirror.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p planta-tests
//!
//! # Run a specific suite
//! cargo test -p planta-tests --test integration_auth
//! cargo test -p planta-tests --test integration_client
//! ```

pub mod common;
