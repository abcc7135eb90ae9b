// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built users, stores, codecs and routers shared by the
//! integration suites. User ids are stable so tests can assert on
//! them directly.

use std::sync::Arc;

use axum::Router;
use planta_api::{ApiConfig, ApiServerBuilder};
use planta_core::{
    CredentialStore, MemoryCredentialStore, PermissionRecord, RoleRecord, TokenCodec, TokenConfig,
    UserRecord,
};

/// Signing secret used by every fixture codec.
pub const TEST_SECRET: &str = "clave-de-prueba-para-firmar-tokens-de-planta";

/// Id of the seeded technician (role `tecnico`, permission `ver_lineas`).
pub const TECHNICIAN_ID: i64 = 1;
/// Id of the seeded supervisor (permissions `ver_lineas` and `ver_cables`).
pub const SUPERVISOR_ID: i64 = 2;
/// Id of the seeded user with no roles at all.
pub const ROLELESS_ID: i64 = 3;
/// Id of the seeded deactivated user.
pub const INACTIVE_ID: i64 = 4;

/// Token configuration shared by fixture codecs and routers.
pub fn test_token_config() -> TokenConfig {
    TokenConfig::new(TEST_SECRET)
}

/// A codec signing with the fixture secret.
pub fn test_codec() -> TokenCodec {
    TokenCodec::new(test_token_config()).expect("fixture codec")
}

/// API configuration pointing at the fixture secret.
pub fn test_api_config() -> ApiConfig {
    let mut config = ApiConfig::new();
    config.token = test_token_config();
    config
}

fn role(id: i64, name: &str, permissions: &[(i64, &str)]) -> RoleRecord {
    RoleRecord::new(id, name).with_permissions(
        permissions
            .iter()
            .map(|(pid, pname)| PermissionRecord::new(*pid, *pname))
            .collect(),
    )
}

/// A store seeded with the four standard users.
pub async fn seeded_store() -> Arc<MemoryCredentialStore> {
    let store = Arc::new(MemoryCredentialStore::new());

    store
        .insert_user(
            UserRecord::new(TECHNICIAN_ID, "tecnico1")
                .with_name("Juan Pérez")
                .with_roles(vec![role(1, "tecnico", &[(10, "ver_lineas")])]),
        )
        .await;
    store
        .insert_credential("tecnico1", TECHNICIAN_ID, "clave-tecnico")
        .await;

    store
        .insert_user(
            UserRecord::new(SUPERVISOR_ID, "supervisora")
                .with_name("Ana López")
                .with_roles(vec![role(
                    2,
                    "supervisor",
                    &[(10, "ver_lineas"), (11, "ver_cables")],
                )]),
        )
        .await;
    store
        .insert_credential("supervisora", SUPERVISOR_ID, "clave-supervisora")
        .await;

    store
        .insert_user(UserRecord::new(ROLELESS_ID, "sinroles").with_name("Sin Roles"))
        .await;

    store
        .insert_user(
            UserRecord::new(INACTIVE_ID, "baja")
                .with_name("Usuario de Baja")
                .with_active(false)
                .with_roles(vec![role(1, "tecnico", &[(10, "ver_lineas")])]),
        )
        .await;

    store
}

/// A router over the seeded store, plus the codec it verifies with.
pub async fn seeded_router() -> (Router, TokenCodec, Arc<MemoryCredentialStore>) {
    let store = seeded_store().await;
    let router = router_over(store.clone());
    (router, test_codec(), store)
}

/// A router over an arbitrary store, using the fixture configuration.
pub fn router_over(store: Arc<dyn CredentialStore>) -> Router {
    ApiServerBuilder::new()
        .config(test_api_config())
        .store(store)
        .build()
        .expect("fixture server")
        .router()
}
