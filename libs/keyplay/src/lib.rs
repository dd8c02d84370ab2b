// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! keyplay - trigger chord and note playback on a remote playback server.
//!
//! This crate provides:
//! - URL construction for the `play_chord` / `play_note` endpoints
//! - A fire-and-forget [`PlayClient`] whose handles can optionally be awaited
//! - Layered configuration (defaults, TOML file, environment)
//! - A stub [`PlaybackServer`] implementing the same endpoints
//!
//! # Example
//!
//! ```no_run
//! use keyplay::{ClientConfig, PlayClient};
//!
//! # async fn demo() -> keyplay::Result<()> {
//! let client = PlayClient::new(&ClientConfig::with_base_url("http://127.0.0.1:8001"))?;
//!
//! // Fire and forget.
//! drop(client.play_chord("Cmaj7"));
//!
//! // Or observe the outcome.
//! let response = client.play_note("A", 4).await?;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pitch;
pub mod server;
pub mod transport;
pub mod url;

pub use client::{PlayClient, PlayHandle};
pub use config::{ClientConfig, KeyplayConfig, ServerConfig};
pub use error::{KeyplayError, Result};
pub use pitch::{CHROMATIC_NOTES, midi_code};
pub use server::{
    LoggingSink, PlayEvent, PlaybackServer, PlaybackSink, RecordingSink, StatusResponse,
};
pub use transport::{HttpTransport, PlayResponse, RecordingTransport, Transport};
pub use url::{chord_url, note_url};

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
