// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use planta_core::{AuthError, AuthSession};

use crate::error::ApiError;

// =============================================================================
// Session Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Pulls the [`AuthSession`] the authentication layer attached to the
/// request. Rejects with 401 when the route was mounted outside the
/// authentication layer.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Session(session): Session) -> impl IntoResponse {
///     format!("Hola, {}", session.user.username)
/// }
/// ```
pub struct Session(pub AuthSession);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .map(Session)
            .ok_or_else(|| ApiError::from(AuthError::NoIdentity))
    }
}

// =============================================================================
// Optional Session Extractor
// =============================================================================

/// Extractor for optionally authenticated requests.
///
/// Returns `None` on public routes instead of rejecting.
pub struct OptionalSession(pub Option<AuthSession>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(
            parts.extensions.get::<AuthSession>().cloned(),
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use planta_core::UserRecord;

    #[tokio::test]
    async fn test_session_extractor_without_session_rejects() {
        let req = axum::http::Request::builder()
            .uri("/test")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let result = Session::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_session_extractor_with_session() {
        let session = AuthSession::establish(UserRecord::new(1, "jperez")).unwrap();

        let req = axum::http::Request::builder()
            .uri("/test")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        parts.extensions.insert(session);

        let Session(session) = Session::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(session.user_id(), 1);
    }

    #[tokio::test]
    async fn test_optional_session_is_none_on_public_routes() {
        let req = axum::http::Request::builder()
            .uri("/health")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let OptionalSession(session) = OptionalSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(session.is_none());
    }
}
