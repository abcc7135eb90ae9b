// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application configuration loading and seeding.
//!
//! The configuration file is YAML with two sections: `api` (server,
//! token and timeout settings) and `seed` (initial users loaded into
//! the credential store at startup). Seed user rows are kept as raw
//! JSON values so exports from the legacy database, with their
//! `tb_rol`/`tb_permiso` association keys, load without rewriting.

use std::path::Path;
use std::sync::Arc;

use planta_api::ApiConfig;
use planta_core::{legacy, MemoryCredentialStore};
use serde::{Deserialize, Serialize};

use crate::error::{BinError, Result};

// =============================================================================
// Configuration Types
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API server configuration
    pub api: ApiConfig,

    /// Initial store contents
    pub seed: SeedConfig,
}

/// Users to load into the credential store at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed user entries
    pub users: Vec<SeedUser>,
}

/// A single seed user: a raw record plus an optional login password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Raw user row, in current or legacy field shape
    pub record: serde_json::Value,

    /// Password to register for this user, if it should be able to log in.
    /// Never serialized back out.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

// =============================================================================
// Loading
// =============================================================================

/// Load and validate configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BinError::configuration(format!("cannot read {}: {e}", path.display()))
    })?;

    let config: AppConfig = serde_yaml::from_str(&contents)
        .map_err(|e| BinError::configuration(format!("invalid configuration: {e}")))?;

    config
        .api
        .token
        .validate()
        .map_err(|e| BinError::configuration(e.to_string()))?;

    Ok(config)
}

// =============================================================================
// Seeding
// =============================================================================

/// Load seed users into the store.
///
/// Each record is normalized from its raw shape first, so legacy
/// association keys are accepted. Returns the number of users loaded.
pub async fn seed_store(store: &Arc<MemoryCredentialStore>, seed: &SeedConfig) -> Result<usize> {
    for entry in &seed.users {
        let user = legacy::normalize_user(&entry.record)
            .map_err(|e| BinError::configuration(format!("invalid seed user: {e}")))?;

        let user_id = user.id;
        let username = user.username.clone();
        store.insert_user(user).await;

        if let Some(password) = &entry.password {
            store.insert_credential(username, user_id, password).await;
        }
    }

    tracing::info!(users = seed.users.len(), "credential store seeded");
    Ok(seed.users.len())
}

// =============================================================================
// Tests
// =============================================================================
