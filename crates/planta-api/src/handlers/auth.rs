// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use axum::{extract::State, response::IntoResponse, Json};
use planta_core::AuthError;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Session;
use crate::response::{ApiResponse, AuthResponse, ProfileResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Checks a username/password pair against the credential store and issues
/// a bearer token. Unknown usernames and wrong passwords produce the same
/// rejection.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request(
            "Se requieren usuario y contraseña",
        ));
    }

    let user_id = state
        .store()
        .verify_login(&request.username, &request.password)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "credential store failed during login");
            AuthError::StoreUnavailable {
                reason: e.to_string(),
            }
        })?
        .ok_or_else(|| {
            tracing::debug!(username = %request.username, "login rejected");
            ApiError::from(AuthError::InvalidCredential)
        })?;

    let token = state
        .codec()
        .issue(user_id)
        .map_err(|e| ApiError::internal(format!("token issuance failed: {e}")))?;

    tracing::info!(user_id, "user logged in");

    Ok(Json(AuthResponse::new(
        token,
        state.codec().expiration_secs(),
    )))
}

// =============================================================================
// Logout
// =============================================================================

/// POST /api/v1/auth/logout
///
/// Acknowledges the logout. Tokens are stateless; the client discards its
/// copy and the token simply ages out.
pub async fn logout(Session(session): Session) -> ApiResult<impl IntoResponse> {
    tracing::info!(user_id = session.user_id(), "user logged out");

    Ok(Json(ApiResponse::message("Sesión cerrada")))
}

// =============================================================================
// Current User
// =============================================================================

/// GET /api/v1/auth/me
///
/// Returns the authenticated user with roles and flattened permissions, as
/// loaded by the authentication gate for this request.
pub async fn current_user(Session(session): Session) -> ApiResult<impl IntoResponse> {
    let profile = ProfileResponse {
        id: session.user.id,
        username: session.user.username.clone(),
        name: session.user.name.clone(),
        roles: session.role_names().iter().map(|s| s.to_string()).collect(),
        permissions: session
            .permission_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    Ok(Json(ApiResponse::success(profile)))
}
