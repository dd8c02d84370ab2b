// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;

use anyhow::{Context, Result};
use keyplay::{LoggingSink, PlaybackServer, ServerConfig};

/// Run the playback server stub until Ctrl+C.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let server = PlaybackServer::bind(config, Arc::new(LoggingSink))
        .await
        .context("Failed to start playback server")?;

    println!("Playback server: http://{}", server.local_addr());
    println!("  keyplay --base-url {} chord CEG", server.base_url());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    tracing::info!("Ctrl+C received, shutting down playback server");
    server.shutdown().await?;
    Ok(())
}
