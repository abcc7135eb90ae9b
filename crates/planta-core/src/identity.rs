// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity, role and permission records.
//!
//! These are read-only projections of what the credential store holds. The
//! core never mutates them; administrative CRUD flows own all writes.

use serde::{Deserialize, Serialize};

// =============================================================================
// PermissionRecord
// =============================================================================

/// A named capability atom.
///
/// Permission names are the contract surface between route declarations and
/// the evaluator: case-sensitive, exact-match tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Unique identifier.
    pub id: i64,
    /// Unique permission name (e.g. `ver_lineas`).
    #[serde(alias = "nombre")]
    pub name: String,
}

impl PermissionRecord {
    /// Creates a new permission record.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// =============================================================================
// RoleRecord
// =============================================================================

/// A named bundle of permissions, assignable to users many-to-many.
///
/// Pure relationship data: no ordering guarantee on `permissions`, duplicates
/// tolerated, and an empty list is a valid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Unique identifier.
    pub id: i64,
    /// Role name.
    #[serde(alias = "nombre")]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "descripcion")]
    pub description: Option<String>,
    /// Permissions attached to this role, already normalized to the
    /// canonical shape (see [`crate::legacy`]).
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
}

impl RoleRecord {
    /// Creates a new role record.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            permissions: Vec::new(),
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches permissions.
    pub fn with_permissions(mut self, permissions: Vec<PermissionRecord>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Returns `true` if this role carries the named permission.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.name == permission)
    }
}

// =============================================================================
// UserRecord
// =============================================================================

/// A user as resolved by the credential store: identity attributes plus the
/// fully resolved role/permission graph, fetched in one logical query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Immutable unique identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the account may authenticate.
    #[serde(default = "default_active", alias = "activo")]
    pub active: bool,
    /// Roles assigned to this user. Zero roles is a valid state.
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
}

fn default_active() -> bool {
    true
}

impl UserRecord {
    /// Creates a new active user record.
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            name: None,
            email: None,
            active: true,
            roles: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Attaches roles.
    pub fn with_roles(mut self, roles: Vec<RoleRecord>) -> Self {
        self.roles = roles;
        self
    }

    /// Returns every permission name attached through any role.
    ///
    /// The same name appearing under multiple roles is reported once.
    pub fn permission_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .roles
            .iter()
            .flat_map(|r| r.permissions.iter().map(|p| p.name.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_grants_exact_match() {
        let role = RoleRecord::new(1, "consulta")
            .with_permissions(vec![PermissionRecord::new(10, "ver_lineas")]);

        assert!(role.grants("ver_lineas"));
        assert!(!role.grants("Ver_Lineas")); // case-sensitive
        assert!(!role.grants("ver_cables"));
    }

    #[test]
    fn test_permission_names_dedup_across_roles() {
        let user = UserRecord::new(1, "mlopez").with_roles(vec![
            RoleRecord::new(1, "consulta")
                .with_permissions(vec![PermissionRecord::new(10, "ver_lineas")]),
            RoleRecord::new(2, "tecnico").with_permissions(vec![
                PermissionRecord::new(10, "ver_lineas"),
                PermissionRecord::new(11, "ver_cables"),
            ]),
        ]);

        assert_eq!(user.permission_names(), vec!["ver_cables", "ver_lineas"]);
    }

    #[test]
    fn test_deserialize_spanish_field_names() {
        let json = serde_json::json!({
            "id": 3,
            "nombre": "ver_empalmes"
        });
        let perm: PermissionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(perm.name, "ver_empalmes");

        let json = serde_json::json!({
            "id": 9,
            "username": "jperez",
            "activo": false
        });
        let user: UserRecord = serde_json::from_value(json).unwrap();
        assert!(!user.active);
        assert!(user.roles.is_empty());
    }
}
