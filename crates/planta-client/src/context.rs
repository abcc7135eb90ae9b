// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client-side session context.
//!
//! Mirrors the authenticated user for the lifetime of the client process:
//! login stores the token and profile, logout clears both, and
//! [`SessionContext::has_permission`] answers from the mirrored profile.
//!
//! The mirror is advisory. It lets a UI hide actions the user cannot
//! perform; the server re-evaluates every request regardless, so a stale or
//! tampered mirror widens nothing.

use std::sync::Arc;

use planta_core::evaluator;
use tokio::sync::RwLock;

use crate::cache::TokenCache;
use crate::error::{ClientError, ClientResult};
use crate::transport::{Profile, SessionTransport};

#[derive(Debug, Clone)]
struct ActiveSession {
    token: String,
    profile: Profile,
}

// =============================================================================
// SessionContext
// =============================================================================

/// Client session context.
///
/// Cloning shares the same underlying session state.
#[derive(Clone)]
pub struct SessionContext {
    transport: Arc<dyn SessionTransport>,
    cache: Option<TokenCache>,
    session: Arc<RwLock<Option<ActiveSession>>>,
}

impl SessionContext {
    /// Creates a context over the given transport, without a token cache.
    pub fn new(transport: Arc<dyn SessionTransport>) -> Self {
        Self {
            transport,
            cache: None,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Attaches an on-disk token cache.
    pub fn with_cache(mut self, cache: TokenCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attempts to resume a previous session from the token cache.
    ///
    /// A cached token the server rejects is discarded silently and the
    /// context starts logged out; only transport and cache faults surface
    /// as errors.
    pub async fn initialize(&self) -> ClientResult<bool> {
        let Some(cache) = &self.cache else {
            return Ok(false);
        };
        let Some(token) = cache.load()? else {
            return Ok(false);
        };

        match self.transport.fetch_profile(&token).await {
            Ok(profile) => {
                tracing::debug!(user_id = profile.id, "resumed session from cached token");
                *self.session.write().await = Some(ActiveSession { token, profile });
                Ok(true)
            }
            Err(e) if e.is_credential_rejection() => {
                tracing::debug!("cached token rejected, starting logged out");
                cache.clear()?;
                *self.session.write().await = None;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Logs in with the given credentials.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let issued = self.transport.login(username, password).await?;
        let profile = self.transport.fetch_profile(&issued.token).await?;

        if let Some(cache) = &self.cache {
            cache.store(&issued.token)?;
        }

        tracing::info!(user_id = profile.id, "logged in");
        *self.session.write().await = Some(ActiveSession {
            token: issued.token,
            profile,
        });

        Ok(())
    }

    /// Logs out, clearing the mirrored state and the cached token.
    pub async fn logout(&self) -> ClientResult<()> {
        if let Some(cache) = &self.cache {
            cache.clear()?;
        }
        *self.session.write().await = None;

        Ok(())
    }

    /// Returns `true` when a session is active.
    pub async fn is_logged_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Returns the active bearer token.
    pub async fn token(&self) -> ClientResult<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NotLoggedIn)
    }

    /// Returns the mirrored profile of the logged-in user.
    pub async fn current_user(&self) -> Option<Profile> {
        self.session.read().await.as_ref().map(|s| s.profile.clone())
    }

    /// Answers whether the mirrored profile carries the named permission.
    ///
    /// Delegates to the same evaluator the server runs, over the flattened
    /// names the profile carries. Logged out, or logged in with no
    /// permissions, answers `false`.
    pub async fn has_permission(&self, required: &str) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| evaluator::name_granted(&s.profile.permissions, required))
            .unwrap_or(false)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::IssuedToken;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FakeTransport {
        valid_token: String,
        profile: Profile,
        profile_fetches: AtomicU64,
    }

    impl FakeTransport {
        fn new() -> Self {
            Self {
                valid_token: "good-token".to_string(),
                profile: Profile {
                    id: 7,
                    username: "jperez".to_string(),
                    name: None,
                    roles: vec!["consulta".to_string()],
                    permissions: vec!["ver_lineas".to_string()],
                },
                profile_fetches: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl SessionTransport for FakeTransport {
        async fn login(&self, username: &str, password: &str) -> ClientResult<IssuedToken> {
            if username == "jperez" && password == "secreto" {
                Ok(IssuedToken {
                    token: self.valid_token.clone(),
                    token_type: "Bearer".to_string(),
                    expires_in: 3600,
                })
            } else {
                Err(ClientError::Rejected {
                    status: 401,
                    message: "Token inválido o sesión expirada".to_string(),
                })
            }
        }

        async fn fetch_profile(&self, token: &str) -> ClientResult<Profile> {
            self.profile_fetches.fetch_add(1, Ordering::Relaxed);
            if token == self.valid_token {
                Ok(self.profile.clone())
            } else {
                Err(ClientError::Rejected {
                    status: 401,
                    message: "Token inválido o sesión expirada".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_login_mirrors_profile() {
        let ctx = SessionContext::new(Arc::new(FakeTransport::new()));

        assert!(!ctx.is_logged_in().await);
        ctx.login("jperez", "secreto").await.unwrap();

        assert!(ctx.is_logged_in().await);
        assert!(ctx.has_permission("ver_lineas").await);
        assert!(!ctx.has_permission("editar_lineas").await);
        assert_eq!(ctx.current_user().await.unwrap().username, "jperez");
    }

    #[tokio::test]
    async fn test_has_permission_matches_server_semantics() {
        let ctx = SessionContext::new(Arc::new(FakeTransport::new()));
        ctx.login("jperez", "secreto").await.unwrap();

        // Exact and case-sensitive, as the server evaluator answers.
        assert!(ctx.has_permission("ver_lineas").await);
        assert!(!ctx.has_permission("VER_LINEAS").await);
        assert!(!ctx.has_permission("ver_linea").await);
    }

    #[tokio::test]
    async fn test_logged_out_grants_nothing() {
        let ctx = SessionContext::new(Arc::new(FakeTransport::new()));
        assert!(!ctx.has_permission("ver_lineas").await);
        assert!(ctx.token().await.is_err());
    }

    #[tokio::test]
    async fn test_bad_login_leaves_state_clear() {
        let ctx = SessionContext::new(Arc::new(FakeTransport::new()));

        assert!(ctx.login("jperez", "mal").await.is_err());
        assert!(!ctx.is_logged_in().await);
    }

    #[tokio::test]
    async fn test_logout_clears_cache_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path().join("token"));
        let ctx =
            SessionContext::new(Arc::new(FakeTransport::new())).with_cache(cache.clone());

        ctx.login("jperez", "secreto").await.unwrap();
        assert!(cache.load().unwrap().is_some());

        ctx.logout().await.unwrap();
        assert!(!ctx.is_logged_in().await);
        assert_eq!(cache.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_initialize_resumes_valid_cached_token() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path().join("token"));
        cache.store("good-token").unwrap();

        let ctx =
            SessionContext::new(Arc::new(FakeTransport::new())).with_cache(cache.clone());

        assert!(ctx.initialize().await.unwrap());
        assert!(ctx.has_permission("ver_lineas").await);
    }

    #[tokio::test]
    async fn test_initialize_discards_rejected_token_silently() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path().join("token"));
        cache.store("stale-token").unwrap();

        let ctx =
            SessionContext::new(Arc::new(FakeTransport::new())).with_cache(cache.clone());

        assert!(!ctx.initialize().await.unwrap());
        assert!(!ctx.is_logged_in().await);
        assert_eq!(cache.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_initialize_without_cache_is_logged_out() {
        let ctx = SessionContext::new(Arc::new(FakeTransport::new()));
        assert!(!ctx.initialize().await.unwrap());
    }
}
