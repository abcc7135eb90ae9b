// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bearer token authentication middleware.
//!
//! This is the single entry point for identity on protected routes. It
//! extracts the bearer token, verifies it, loads the user with roles and
//! permissions in one bounded store fetch, and attaches the resulting
//! [`AuthSession`] to the request. Handlers and the permission layer read
//! the session from extensions; nothing downstream touches the store again.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use planta_core::{AuthError, AuthSession, CredentialStore, TokenCodec, TokenError};
use tower::{Layer, Service};

use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer for bearer token authentication.
///
/// Wraps services to authenticate every request whose path is not listed as
/// public. Rejections short-circuit before the inner service runs.
#[derive(Clone)]
pub struct AuthLayer {
    codec: Arc<TokenCodec>,
    store: Arc<dyn CredentialStore>,
    store_timeout: Duration,
    public_paths: Arc<HashSet<String>>,
}

impl AuthLayer {
    /// Creates a new auth layer.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            codec,
            store,
            store_timeout: Duration::from_secs(5),
            public_paths: Arc::new(HashSet::new()),
        }
    }

    /// Bounds the credential store fetch.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Adds public paths that don't require authentication.
    pub fn with_public_paths(mut self, paths: Vec<String>) -> Self {
        self.public_paths = Arc::new(paths.into_iter().collect());
        self
    }

    /// Creates with default public paths.
    pub fn with_default_public_paths(self) -> Self {
        self.with_public_paths(vec![
            "/health".to_string(),
            "/ready".to_string(),
            "/api/v1/auth/login".to_string(),
        ])
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            codec: self.codec.clone(),
            store: self.store.clone(),
            store_timeout: self.store_timeout,
            public_paths: self.public_paths.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware for bearer token authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    codec: Arc<TokenCodec>,
    store: Arc<dyn CredentialStore>,
    store_timeout: Duration,
    public_paths: Arc<HashSet<String>>,
}

impl<S> AuthMiddleware<S> {
    /// Checks if a path is public.
    fn is_public_path(&self, path: &str) -> bool {
        if self.public_paths.contains(path) {
            return true;
        }

        // Trailing-star entries match by prefix
        for public_path in self.public_paths.iter() {
            if let Some(prefix) = public_path.strip_suffix('*') {
                if path.starts_with(prefix) {
                    return true;
                }
            }
        }

        false
    }
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let codec = self.codec.clone();
        let store = self.store.clone();
        let store_timeout = self.store_timeout;
        let is_public = self.is_public_path(req.uri().path());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if is_public {
                return inner.call(req).await;
            }

            // Authenticate against the bodyless head so the future stays
            // `Send` (`axum::body::Body` is not `Sync`).
            let (parts, body) = req.into_parts();
            let head = Request::from_parts(parts, ());

            let session =
                match authenticate(&head, codec.as_ref(), store.as_ref(), store_timeout).await {
                    Ok(session) => session,
                    Err(e) => return Ok(ApiError::from(e).into_response()),
                };

            let (parts, ()) = head.into_parts();
            let mut req = Request::from_parts(parts, body);
            req.extensions_mut().insert(session);

            inner.call(req).await
        })
    }
}

// =============================================================================
// Authentication pipeline
// =============================================================================

/// Runs the full authentication pipeline for one request.
///
/// Token verification happens before any store access, so a tampered or
/// expired token costs no query. Exactly one store fetch follows for a
/// verified token.
async fn authenticate<B>(
    req: &Request<B>,
    codec: &TokenCodec,
    store: &dyn CredentialStore,
    store_timeout: Duration,
) -> Result<AuthSession, AuthError> {
    let token = extract_bearer_token(req).ok_or(AuthError::MissingCredential)?;

    let claims = codec.verify(&token).map_err(|e| {
        // The expired/forged distinction stays in the log.
        match e {
            TokenError::Expired => tracing::debug!("token rejected: expired"),
            ref other => tracing::debug!(error = %other, "token rejected"),
        }
        AuthError::InvalidCredential
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::debug!(error = %e, "token subject is not a user id");
        AuthError::InvalidCredential
    })?;

    let fetch = store.find_user_with_access(user_id);
    let user = match tokio::time::timeout(store_timeout, fetch).await {
        Err(_) => {
            tracing::error!(user_id, timeout = ?store_timeout, "credential store fetch timed out");
            return Err(AuthError::StoreUnavailable {
                reason: format!("lookup timed out after {store_timeout:?}"),
            });
        }
        Ok(Err(e)) => {
            tracing::error!(user_id, error = %e, "credential store fetch failed");
            return Err(AuthError::StoreUnavailable {
                reason: e.to_string(),
            });
        }
        Ok(Ok(None)) => {
            tracing::warn!(user_id, "token names a user the store does not know");
            return Err(AuthError::UnknownIdentity { user_id });
        }
        Ok(Ok(Some(user))) => user,
    };

    let session = AuthSession::establish(user)?;

    tracing::debug!(
        user_id = session.user_id(),
        request_id = %session.request_id,
        roles = ?session.role_names(),
        "request authenticated"
    );

    Ok(session)
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
