// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Command implementations.

mod run;
mod validate;
mod version;

use crate::cli::{Cli, Commands};
use crate::error::Result;

/// Execute the command selected on the CLI.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Run(args) => run::execute(&cli, args).await,
        Commands::Validate(args) => validate::execute(&cli, args),
        Commands::Version => version::execute(),
    }
}
