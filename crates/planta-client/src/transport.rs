// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transport to the API server.
//!
//! The [`SessionTransport`] trait is the seam tests use to drive the client
//! context without a running server; [`HttpSessionTransport`] is the real
//! implementation over reqwest.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Wire types
// =============================================================================

/// A successful login as the server reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The bearer token.
    pub token: String,
    /// Token type, always "Bearer".
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// The authenticated user as the server reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// User id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Role names.
    pub roles: Vec<String>,
    /// Flattened permission names.
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<T>,
}

// =============================================================================
// SessionTransport
// =============================================================================

/// Server operations the session context depends on.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Exchanges credentials for a token.
    async fn login(&self, username: &str, password: &str) -> ClientResult<IssuedToken>;

    /// Fetches the profile the given token authenticates as.
    async fn fetch_profile(&self, token: &str) -> ClientResult<Profile>;
}

// =============================================================================
// HttpSessionTransport
// =============================================================================

/// HTTP transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpSessionTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSessionTransport {
    /// Creates a transport against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn rejection(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let message = match response.json::<Envelope<serde_json::Value>>().await {
            Ok(body) => body.message.unwrap_or_default(),
            Err(_) => String::new(),
        };
        ClientError::Rejected { status, message }
    }
}

#[async_trait]
impl SessionTransport for HttpSessionTransport {
    async fn login(&self, username: &str, password: &str) -> ClientResult<IssuedToken> {
        let response = self
            .client
            .post(format!("{}/api/v1/auth/login", self.base_url))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(response.json::<IssuedToken>().await?)
    }

    async fn fetch_profile(&self, token: &str) -> ClientResult<Profile> {
        let response = self
            .client
            .get(format!("{}/api/v1/auth/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let envelope = response.json::<Envelope<Profile>>().await?;
        match envelope.data {
            Some(profile) if envelope.success => Ok(profile),
            _ => Err(ClientError::Rejected {
                status: 200,
                message: envelope.message.unwrap_or_default(),
            }),
        }
    }
}
