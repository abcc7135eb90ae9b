// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Normalization of legacy credential-store row shapes.
//!
//! The upstream relational mapping attaches a role's permission list under
//! association names that drifted over time: `permisos` (canonical),
//! `tb_permiso` and `tb_permisos` (older generated names). Likewise `name`
//! fields appear as `nombre` on old rows.
//!
//! All of that variation is absorbed here, once, at the store boundary. The
//! evaluator and everything downstream only ever see the canonical
//! [`RoleRecord`] shape. The alternate keys are a migration compatibility
//! shim, not a long-term contract.

use serde_json::Value;

use crate::error::StoreError;
use crate::identity::{PermissionRecord, RoleRecord, UserRecord};

/// Candidate association names for a role's permission list, probed in order.
/// The first key that is present and non-empty wins.
pub const PERMISSION_ASSOCIATION_KEYS: &[&str] = &["permisos", "tb_permiso", "tb_permisos"];

/// Candidate association names for a user's role list.
pub const ROLE_ASSOCIATION_KEYS: &[&str] = &["roles", "tb_rol", "tb_roles"];

// =============================================================================
// User normalization
// =============================================================================

/// Normalizes one raw user row (with nested roles/permissions) into the
/// canonical [`UserRecord`].
///
/// Accepts both the canonical shape and any of the legacy association names.
pub fn normalize_user(raw: &Value) -> Result<UserRecord, StoreError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| StoreError::backend("user row is not an object"))?;

    let id = require_i64(raw, "id", "user")?;
    let username = string_field(obj, &["username", "usuario"])
        .ok_or_else(|| StoreError::backend(format!("user {id} has no username")))?;

    let roles = probe_list(raw, ROLE_ASSOCIATION_KEYS)
        .map(|items| items.iter().map(normalize_role).collect::<Result<_, _>>())
        .transpose()?
        .unwrap_or_default();

    Ok(UserRecord {
        id,
        username,
        name: string_field(obj, &["name", "nombre"]),
        email: string_field(obj, &["email", "correo"]),
        active: bool_field(obj, &["active", "activo"]).unwrap_or(true),
        roles,
    })
}

/// Normalizes one raw role row into the canonical [`RoleRecord`].
pub fn normalize_role(raw: &Value) -> Result<RoleRecord, StoreError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| StoreError::backend("role row is not an object"))?;

    let id = require_i64(raw, "id", "role")?;
    let name = string_field(obj, &["name", "nombre"])
        .ok_or_else(|| StoreError::backend(format!("role {id} has no name")))?;

    let permissions = probe_list(raw, PERMISSION_ASSOCIATION_KEYS)
        .map(|items| {
            items
                .iter()
                .map(normalize_permission)
                .collect::<Result<_, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(RoleRecord {
        id,
        name,
        description: string_field(obj, &["description", "descripcion"]),
        permissions,
    })
}

/// Normalizes one raw permission row into the canonical [`PermissionRecord`].
pub fn normalize_permission(raw: &Value) -> Result<PermissionRecord, StoreError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| StoreError::backend("permission row is not an object"))?;

    let id = require_i64(raw, "id", "permission")?;
    let name = string_field(obj, &["name", "nombre"])
        .ok_or_else(|| StoreError::backend(format!("permission {id} has no name")))?;

    Ok(PermissionRecord { id, name })
}

// =============================================================================
// Probing helpers
// =============================================================================

/// Probes the candidate association keys in order and returns the first list
/// that is present and non-empty.
///
/// An empty list under an earlier key does not shadow a populated list under
/// a later one; rows produced during the association rename carried both.
fn probe_list<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_array))
        .find(|items| !items.is_empty())
}

fn require_i64(raw: &Value, key: &str, entity: &str) -> Result<i64, StoreError> {
    raw.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| StoreError::backend(format!("{entity} row has no numeric `{key}`")))
}

fn string_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .next()
}

fn bool_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_bool))
        .next()
}

// =============================================================================
// Tests
// =============================================================================
