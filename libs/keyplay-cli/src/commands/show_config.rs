// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use anyhow::Result;
use keyplay::KeyplayConfig;

/// Print the resolved configuration.
pub fn run(config: &KeyplayConfig) -> Result<()> {
    if config.client.has_unspecified_host() {
        println!("# client.base_url targets 0.0.0.0; prefer 127.0.0.1 or a hostname");
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
