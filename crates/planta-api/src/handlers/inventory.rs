// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Plant inventory handlers.
//!
//! The permission name each route requires is attached where the route is
//! mounted (see [`crate::server`]); by the time a handler runs, both layers
//! have passed.

use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extractors::Session;
use crate::response::ApiResponse;

// =============================================================================
// Inventory Types
// =============================================================================

/// A telephone line record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInfo {
    /// Line id.
    pub id: i64,
    /// Subscriber number.
    pub numero: String,
    /// Exchange the line terminates in.
    pub central: String,
    /// Whether the line is in service.
    pub activa: bool,
}

/// A cable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableInfo {
    /// Cable id.
    pub id: i64,
    /// Cable designation.
    pub nombre: String,
    /// Pair capacity.
    pub pares: u32,
    /// Route description.
    pub ruta: String,
}

// =============================================================================
// List Lines
// =============================================================================

/// GET /api/v1/lineas
///
/// Lists telephone lines. Mounted with the `ver_lineas` permission.
pub async fn list_lines(Session(session): Session) -> ApiResult<impl IntoResponse> {
    tracing::debug!(
        user_id = session.user_id(),
        request_id = %session.request_id,
        "listing lines"
    );

    let lines = vec![
        LineInfo {
            id: 1,
            numero: "4212001".to_string(),
            central: "Centro".to_string(),
            activa: true,
        },
        LineInfo {
            id: 2,
            numero: "4212002".to_string(),
            central: "Norte".to_string(),
            activa: false,
        },
    ];

    Ok(Json(ApiResponse::success(lines)))
}

// =============================================================================
// List Cables
// =============================================================================

/// GET /api/v1/cables
///
/// Lists cables. Mounted with the `ver_cables` permission.
pub async fn list_cables(Session(session): Session) -> ApiResult<impl IntoResponse> {
    tracing::debug!(
        user_id = session.user_id(),
        request_id = %session.request_id,
        "listing cables"
    );

    let cables = vec![
        CableInfo {
            id: 1,
            nombre: "C-01".to_string(),
            pares: 600,
            ruta: "Central Centro - Distrito 4".to_string(),
        },
        CableInfo {
            id: 2,
            nombre: "C-02".to_string(),
            pares: 300,
            ruta: "Central Norte - Distrito 7".to_string(),
        },
    ];

    Ok(Json(ApiResponse::success(cables)))
}
