// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authenticated request session.

use uuid::Uuid;

use crate::error::AuthError;
use crate::evaluator;
use crate::identity::UserRecord;

// =============================================================================
// AuthSession
// =============================================================================

/// The identity attached to one authenticated request.
///
/// A session is established exactly once per request, after token
/// verification and the single store fetch. Everything downstream reads from
/// it; nothing re-fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    /// The authenticated user with roles and permissions attached.
    pub user: UserRecord,
    /// Correlates log lines for this request.
    pub request_id: Uuid,
}

impl AuthSession {
    /// Establishes a session for a loaded user.
    ///
    /// Rejects inactive users here rather than in the middleware so that
    /// every construction path enforces the check.
    pub fn establish(user: UserRecord) -> Result<Self, AuthError> {
        if !user.active {
            return Err(AuthError::InactiveIdentity { user_id: user.id });
        }

        Ok(Self {
            user,
            request_id: Uuid::now_v7(),
        })
    }

    /// Returns the authenticated user id.
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    /// Returns true when any of the user's roles grants `required`.
    pub fn has_permission(&self, required: &str) -> bool {
        evaluator::granted(self, required)
    }

    /// Role names held by the user, for log context.
    pub fn role_names(&self) -> Vec<&str> {
        self.user.roles.iter().map(|r| r.name.as_str()).collect()
    }

    /// Flattened, deduplicated permission names across all roles.
    pub fn permission_names(&self) -> Vec<&str> {
        self.user.permission_names()
    }
}

// =============================================================================
// Tests
// =============================================================================
