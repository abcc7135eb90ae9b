// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! On-disk token cache.
//!
//! Holds the bearer token between runs so a restart can resume the session
//! without prompting. The token is opaque to the cache; whether it is still
//! good is only decided by presenting it to the server.

use std::path::{Path, PathBuf};

use crate::error::ClientResult;

/// File-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Creates a cache at the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached token, if one exists.
    pub fn load(&self) -> ClientResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stores a token, replacing any previous one.
    pub fn store(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    /// Removes the cached token.
    pub fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
