// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `validate` command: check the configuration file.

use crate::cli::{Cli, ValidateArgs};
use crate::config::load_config;
use crate::error::{BinError, Result};

/// Parse and validate the configuration without starting the server.
pub fn execute(cli: &Cli, args: ValidateArgs) -> Result<()> {
    let config = load_config(&cli.config)?;

    let mut warnings = Vec::new();
    if config.seed.users.is_empty() {
        warnings.push("no seed users configured".to_string());
    }
    if config.api.token.secret.len() < 32 {
        warnings.push("token secret is shorter than 32 bytes".to_string());
    }
    if config.seed.users.iter().all(|u| u.password.is_none()) && !config.seed.users.is_empty() {
        warnings.push("no seed user has a password; nobody can log in".to_string());
    }

    println!("Configuration OK: {}", cli.config.display());
    println!("  listen:    {}", config.api.socket_addr());
    println!("  base path: {}", config.api.base_path);
    println!("  seed users: {}", config.seed.users.len());

    for warning in &warnings {
        println!("  warning: {warning}");
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::configuration(format!(
            "{} warning(s) in strict mode",
            warnings.len()
        )));
    }

    if args.show_config {
        // The token secret is skipped during serialization.
        let rendered = serde_yaml::to_string(&config)
            .map_err(|e| BinError::configuration(format!("cannot render configuration: {e}")))?;
        println!("\n{rendered}");
    }

    Ok(())
}
