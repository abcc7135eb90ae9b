// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `run` command: start the API server.

use std::sync::Arc;

use planta_api::ApiServerBuilder;
use planta_core::MemoryCredentialStore;
use tracing::info;

use crate::cli::{Cli, RunArgs};
use crate::config::{load_config, seed_store};
use crate::error::Result;
use crate::shutdown::{wait_for_shutdown, ShutdownCoordinator};

/// Load configuration, seed the store and serve until shutdown.
pub async fn execute(cli: &Cli, args: RunArgs) -> Result<()> {
    let mut config = load_config(&cli.config)?;
    if let Some(port) = args.port {
        config.api.port = port;
    }

    info!(
        version = planta_core::VERSION,
        config = %cli.config.display(),
        "starting planta"
    );

    let store = Arc::new(MemoryCredentialStore::new());
    let seeded = seed_store(&store, &config.seed).await?;
    if seeded == 0 {
        tracing::warn!("no seed users configured; nobody will be able to log in");
    }

    let server = ApiServerBuilder::new()
        .config(config.api)
        .store(store)
        .build()?;

    let coordinator = ShutdownCoordinator::new();
    tokio::spawn(wait_for_shutdown(coordinator.clone()));

    info!(addr = %server.addr(), "serving");
    server.run_with_shutdown(coordinator.shutdown_signal()).await?;

    info!("planta stopped");
    Ok(())
}
