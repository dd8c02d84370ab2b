// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! keyplay CLI
//!
//! Command-line interface for triggering playback and running the playback
//! server stub.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyplay::KeyplayConfig;

mod commands;

#[derive(Parser)]
#[command(name = "keyplay")]
#[command(author, version, about = "Chord and note playback CLI", long_about = None)]
struct Cli {
    /// Config file (default: ~/.keyplay/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base address of the playback server (overrides config and KEYPLAY_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a chord (GET <base>/play_chord/<CHORD>)
    Chord {
        /// Chord identifier, sent as-is
        chord: String,
    },

    /// Play a note (GET <base>/play_note/<NOTE>/<OCTAVE>)
    Note {
        /// Note identifier, sent as-is
        note: String,

        /// Octave, sent as-is (negative values allowed)
        #[arg(allow_negative_numbers = true)]
        octave: String,
    },

    /// Run the playback server stub
    Serve {
        /// Host address to bind to (default from config: 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default from config: 8001)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the resolved configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Missing .env is fine
    let _ = dotenvy::dotenv();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = cli
        .config
        .clone()
        .or_else(|| KeyplayConfig::default_path().filter(|p| p.exists()));
    tracing::debug!(
        "Config file: {}",
        config_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none, using defaults".to_string())
    );

    let mut config =
        KeyplayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.client.base_url = base_url;
        config
            .client
            .normalize()
            .context("Invalid --base-url")?;
    }
    tracing::debug!("Base address: {}", config.client.base_url);

    match cli.command {
        Some(Commands::Chord { chord }) => {
            commands::play::chord(&config.client, &chord).await?;
        }
        Some(Commands::Note { note, octave }) => {
            commands::play::note(&config.client, &note, &octave).await?;
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            commands::serve::run(&config.server).await?;
        }
        Some(Commands::Config) => {
            commands::show_config::run(&config)?;
        }
        None => {
            // No subcommand: show help
            Cli::parse_from(["keyplay", "--help"]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_with_negative_octave() {
        let cli = Cli::try_parse_from(["keyplay", "note", "A", "-1"]).unwrap();
        match cli.command {
            Some(Commands::Note { note, octave }) => {
                assert_eq!(note, "A");
                assert_eq!(octave, "-1");
            }
            _ => panic!("expected note command"),
        }
    }

    #[test]
    fn test_parse_global_base_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "keyplay",
            "chord",
            "Cmaj7",
            "--base-url",
            "http://127.0.0.1:9000",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(matches!(cli.command, Some(Commands::Chord { ref chord }) if chord == "Cmaj7"));
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["keyplay", "serve", "--host", "127.0.0.1", "-p", "9100"])
            .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9100));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
