// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Credential store doubles for exercising failure paths that the
//! in-memory store never produces on its own.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use planta_core::{CredentialStore, StoreError, UserRecord};

// =============================================================================
// FailingStore
// =============================================================================

/// A store whose every call fails with a backend error.
#[derive(Debug, Default)]
pub struct FailingStore {
    calls: AtomicU64,
}

impl FailingStore {
    /// Create a new failing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for FailingStore {
    async fn find_user_with_access(&self, _user_id: i64) -> Result<Option<UserRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("connection refused"))
    }

    async fn verify_login(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<Option<i64>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("connection refused"))
    }
}

// =============================================================================
// HangingStore
// =============================================================================

/// A store that never answers within any reasonable deadline.
#[derive(Debug)]
pub struct HangingStore {
    delay: Duration,
}

impl HangingStore {
    /// Create a store that sleeps for one minute per call.
    pub fn new() -> Self {
        Self {
            delay: Duration::from_secs(60),
        }
    }
}

impl Default for HangingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for HangingStore {
    async fn find_user_with_access(&self, _user_id: i64) -> Result<Option<UserRecord>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn verify_login(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<Option<i64>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}
