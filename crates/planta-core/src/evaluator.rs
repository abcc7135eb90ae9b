// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission evaluation.
//!
//! The model is flat: a user holds roles, a role holds named permissions, and
//! a check asks whether any role grants one required name. Comparison is
//! exact and case-sensitive. There are no wildcards, no hierarchies and no
//! implied permissions; `"editar_lineas"` does not grant `"ver_lineas"`.
//!
//! Evaluation is pure. It reads only the session it is handed and never goes
//! back to the credential store, so checking N permissions on one request
//! costs N string scans, not N queries.

use crate::error::AuthError;
use crate::session::AuthSession;

/// Authorizes a session against one required permission name.
///
/// Failure modes are distinct so the caller can log them apart:
/// no session at all, a session whose user has zero roles, and a session
/// whose roles simply do not grant the name.
pub fn authorize(session: Option<&AuthSession>, required: &str) -> Result<(), AuthError> {
    let session = session.ok_or(AuthError::NoIdentity)?;

    if session.user.roles.is_empty() {
        return Err(AuthError::NoRoles);
    }

    if granted(session, required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied {
            required: required.to_string(),
        })
    }
}

/// Returns true when any of the session user's roles grants `required`.
pub fn granted(session: &AuthSession, required: &str) -> bool {
    session.user.roles.iter().any(|role| role.grants(required))
}

/// Returns true when `required` appears in a flat list of permission names.
///
/// This is the comparison `granted` applies role by role, exposed for
/// callers that hold only flattened names, such as the client mirror of a
/// server-issued profile. Exact and case-sensitive, like everything here.
pub fn name_granted<S: AsRef<str>>(permissions: &[S], required: &str) -> bool {
    permissions.iter().any(|p| p.as_ref() == required)
}

// =============================================================================
// Tests
// =============================================================================
