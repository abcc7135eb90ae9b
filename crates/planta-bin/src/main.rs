// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! planta binary entry point.

use planta_bin::cli::Cli;
use planta_bin::error::report_error_and_exit;
use planta_bin::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = logging::init_logging(cli.effective_log_level(), cli.log_format) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    if let Err(e) = commands::execute(cli).await {
        report_error_and_exit(&e);
    }
}
