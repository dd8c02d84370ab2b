// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Error types for keyplay.

use thiserror::Error;

/// Errors surfaced by the client, configuration, and playback server.
///
/// A play request that reached the server is never an error, whatever the
/// HTTP status; only failures to reach it are.
#[derive(Error, Debug)]
pub enum KeyplayError {
    /// The server could not be reached.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The configured request timeout elapsed.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The background request task was cancelled or panicked.
    #[error("play task failed: {0}")]
    Task(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The playback server could not bind its listener.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, KeyplayError>;
