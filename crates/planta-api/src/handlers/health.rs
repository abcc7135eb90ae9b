// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::response::{HealthResponse, ReadinessResponse};
use crate::state::AppState;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Simple liveness check. Returns 200 OK if the service is running.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

// =============================================================================
// Readiness Check
// =============================================================================

/// GET /ready
///
/// Readiness check. Probes the credential store with a lookup for a user id
/// that cannot exist; a clean miss proves the store answers.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.store().find_user_with_access(-1).await.is_ok();

    let response = ReadinessResponse { ready };

    if ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

// =============================================================================
// Tests
// =============================================================================
