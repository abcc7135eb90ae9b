// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission enforcement middleware.
//!
//! Applied per route with the permission name the operation requires. Reads
//! the [`AuthSession`] the authentication layer attached and runs the
//! evaluator against it; no store access happens here.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use planta_core::{evaluator, AuthError, AuthSession};
use tower::{Layer, Service};

use crate::error::ApiError;

// =============================================================================
// PermissionLayer
// =============================================================================

/// Layer enforcing one required permission name on a route.
#[derive(Clone)]
pub struct PermissionLayer {
    required: Arc<str>,
}

impl PermissionLayer {
    /// Creates a layer requiring the given permission name.
    pub fn require(permission: impl Into<Arc<str>>) -> Self {
        Self {
            required: permission.into(),
        }
    }
}

impl<S> Layer<S> for PermissionLayer {
    type Service = PermissionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PermissionMiddleware {
            inner,
            required: self.required.clone(),
        }
    }
}

// =============================================================================
// PermissionMiddleware
// =============================================================================

/// Middleware for permission enforcement.
#[derive(Clone)]
pub struct PermissionMiddleware<S> {
    inner: S,
    required: Arc<str>,
}

impl<S> Service<Request<Body>> for PermissionMiddleware<S>
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
        let required = self.required.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let session = req.extensions().get::<AuthSession>();

            match evaluator::authorize(session, &required) {
                Ok(()) => inner.call(req).await,
                Err(e) => {
                    match (&e, session) {
                        (AuthError::NoIdentity, _) => {
                            tracing::warn!(
                                required = %required,
                                "permission check on a route without an authenticated session"
                            );
                        }
                        (kind, Some(session)) => {
                            tracing::warn!(
                                user_id = session.user_id(),
                                request_id = %session.request_id,
                                roles = ?session.role_names(),
                                required = %required,
                                code = kind.code(),
                                "authorization denied"
                            );
                        }
                        (_, None) => {}
                    }
                    Ok(ApiError::from(e).into_response())
                }
            }
        })
    }
}

// =============================================================================
// Macro
// =============================================================================

/// Macro for creating permission layers on routes.
#[macro_export]
macro_rules! require_permission {
    ($perm:expr) => {
        $crate::middleware::PermissionLayer::require($perm)
    };
}

// =============================================================================
// Tests
// =============================================================================
