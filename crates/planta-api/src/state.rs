// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use planta_core::{CredentialStore, MemoryCredentialStore, TokenCodec};

use crate::config::ApiConfig;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// This is the central state container that is passed to all handlers via
/// Axum's state extraction mechanism.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Token codec for issuing and verifying bearer tokens.
    pub codec: Arc<TokenCodec>,
    /// Credential store backing authentication.
    pub store: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the token codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Returns the credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    codec: Option<Arc<TokenCodec>>,
    store: Option<Arc<dyn CredentialStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            codec: None,
            store: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token codec.
    pub fn codec(mut self, codec: Arc<TokenCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Sets the credential store.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the AppState.
    ///
    /// A missing codec is constructed from the configuration; a missing
    /// store defaults to an empty in-memory one.
    pub fn build(self) -> crate::error::ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let codec = match self.codec {
            Some(codec) => codec,
            None => Arc::new(
                TokenCodec::new(config.token.clone())
                    .map_err(|e| crate::error::ApiError::internal(e.to_string()))?,
            ),
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));

        Ok(AppState {
            config: Arc::new(config),
            codec,
            store,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// FromRef implementations for extracting parts of state
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.codec.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ApiConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
