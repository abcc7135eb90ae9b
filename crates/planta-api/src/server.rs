// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use planta_core::CredentialStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::handlers;
use crate::middleware::{AuthLayer, PermissionLayer};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and middleware.
    ///
    /// The authentication layer wraps everything except its public paths;
    /// each inventory route additionally carries the permission layer for
    /// the operation it exposes.
    pub fn router(&self) -> Router {
        let cors = create_cors_layer(&self.config);
        let auth = AuthLayer::new(self.state.codec.clone(), self.state.store.clone())
            .with_store_timeout(self.config.store_timeout)
            .with_default_public_paths();

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(cors)
            .layer(auth);

        Router::new()
            // Health endpoints (public)
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            // Auth endpoints
            .route("/api/v1/auth/login", post(handlers::login))
            .route("/api/v1/auth/logout", post(handlers::logout))
            .route("/api/v1/auth/me", get(handlers::current_user))
            // Inventory endpoints, each gated by its permission
            .route(
                "/api/v1/lineas",
                get(handlers::list_lines).route_layer(PermissionLayer::require("ver_lineas")),
            )
            .route(
                "/api/v1/cables",
                get(handlers::list_cables).route_layer(PermissionLayer::require("ver_cables")),
            )
            // Apply middleware and state
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    if cors.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if cors.allowed_headers.contains(&"*".to_string()) {
        layer = layer.allow_headers(Any);
    } else {
        layer = layer.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);
    }

    if cors.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}

// =============================================================================
// Server Builder
// =============================================================================

/// Builder for creating the API server.
pub struct ApiServerBuilder {
    state_builder: crate::state::AppStateBuilder,
}

impl ApiServerBuilder {
    /// Creates a new server builder.
    pub fn new() -> Self {
        Self {
            state_builder: AppState::builder(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.state_builder = self.state_builder.config(config);
        self
    }

    /// Sets the credential store.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.state_builder = self.state_builder.store(store);
        self
    }

    /// Builds the server.
    pub fn build(self) -> ApiResult<ApiServer> {
        let state = self.state_builder.build()?;
        Ok(ApiServer::new(state))
    }
}

impl Default for ApiServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
