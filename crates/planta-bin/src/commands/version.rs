// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `version` command: show component versions.

use crate::error::Result;

/// Print version information for all workspace components.
pub fn execute() -> Result<()> {
    println!("planta {}", crate::VERSION);
    println!("  planta-core {}", planta_core::VERSION);
    println!("  planta-api  {}", planta_api::VERSION);
    println!();
    println!("License: PolyForm-Noncommercial-1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");
    Ok(())
}
