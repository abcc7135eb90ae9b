// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential store abstraction.
//!
//! One trait call loads a user with roles and permissions attached. The
//! authentication gate performs exactly one such call per request; backends
//! are expected to fetch the whole graph in a single query rather than
//! lazy-loading associations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::identity::UserRecord;
use crate::legacy;

// =============================================================================
// CredentialStore
// =============================================================================

/// Backend that resolves user identities and credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads a user by id with roles and permissions attached, in one fetch.
    ///
    /// Returns `Ok(None)` when the id does not resolve; `Err` is reserved
    /// for backend failures.
    async fn find_user_with_access(&self, user_id: i64) -> Result<Option<UserRecord>, StoreError>;

    /// Checks a username/password pair and returns the user id on success.
    ///
    /// Returns `Ok(None)` for unknown usernames and wrong passwords alike.
    async fn verify_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<i64>, StoreError>;
}

// =============================================================================
// MemoryCredentialStore
// =============================================================================

/// In-memory credential store.
///
/// Backs the demo configuration and tests. Rows can be ingested in the raw
/// legacy JSON shapes; normalization happens at ingestion so lookups return
/// canonical records.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<i64, UserRecord>>,
    passwords: RwLock<HashMap<String, (i64, String)>>,
    lookups: AtomicU64,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a canonical user record.
    pub async fn insert_user(&self, user: UserRecord) {
        self.users.write().await.insert(user.id, user);
    }

    /// Ingests a raw user row in any of the supported legacy shapes.
    pub async fn ingest_raw_user(&self, raw: &Value) -> Result<(), StoreError> {
        let user = legacy::normalize_user(raw)?;
        self.insert_user(user).await;
        Ok(())
    }

    /// Registers a login credential for a user id.
    pub async fn insert_credential(
        &self,
        username: impl Into<String>,
        user_id: i64,
        password: impl Into<String>,
    ) {
        self.passwords
            .write()
            .await
            .insert(username.into(), (user_id, password.into()));
    }

    /// Marks a user active or inactive.
    pub async fn set_active(&self, user_id: i64, active: bool) {
        if let Some(user) = self.users.write().await.get_mut(&user_id) {
            user.active = active;
        }
    }

    /// Number of `find_user_with_access` calls served so far.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_user_with_access(&self, user_id: i64) -> Result<Option<UserRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn verify_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<i64>, StoreError> {
        let passwords = self.passwords.read().await;
        match passwords.get(username) {
            Some((user_id, stored)) if stored == password => Ok(Some(*user_id)),
            _ => Ok(None),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
