// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Layered configuration: defaults, then a TOML file, then environment.
//!
//! Command-line overrides are applied on top by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KeyplayError, Result};

/// Base address the original deployment used. `0.0.0.0` is a bind address,
/// not a destination; see [`ClientConfig::has_unspecified_host`].
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:8001";

pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8001;

pub const ENV_BASE_URL: &str = "KEYPLAY_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "KEYPLAY_TIMEOUT_MS";
pub const ENV_HOST: &str = "KEYPLAY_HOST";
pub const ENV_PORT: &str = "KEYPLAY_PORT";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyplayConfig {
    pub client: ClientConfig,
    pub server: ServerConfig,
}

/// Where play requests go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix of every request URL, e.g. `http://127.0.0.1:8001`.
    pub base_url: String,
    /// Per-request timeout. Unset means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// Where the playback server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Client config pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// True when the base address targets `0.0.0.0`, which many platforms
    /// refuse as a destination.
    pub fn has_unspecified_host(&self) -> bool {
        let rest = self
            .base_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.base_url);
        let authority = rest.split('/').next().unwrap_or("");
        let host = authority.rsplit('@').next().unwrap_or("");
        host == "0.0.0.0" || host.starts_with("0.0.0.0:")
    }

    /// Strip one trailing `/` and reject an empty base or one without an
    /// `http://` / `https://` scheme.
    pub fn normalize(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(KeyplayError::Configuration(
                "client.base_url must not be empty".to_string(),
            ));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(KeyplayError::Configuration(format!(
                "client.base_url '{}' must start with http:// or https://",
                trimmed
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl KeyplayConfig {
    /// Default config file location (`~/.keyplay/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".keyplay").join("config.toml"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Resolve the full configuration from the process environment.
    ///
    /// An explicit `path` must exist. Without one, the default path is read
    /// if present. Environment variables are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// [`load`](Self::load) with variables looked up through `lookup`.
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).map_err(|e| match e {
                KeyplayError::Io(io) => KeyplayError::Configuration(format!(
                    "cannot read config file {}: {}",
                    path.display(),
                    io
                )),
                other => other,
            })?,
            None => match Self::default_path() {
                Some(default) if default.exists() => {
                    tracing::debug!("Loading config from {}", default.display());
                    Self::from_file(&default)?
                }
                _ => Self::default(),
            },
        };

        config.apply_vars(lookup)?;
        config.client.normalize()?;
        Ok(config)
    }

    /// Apply `KEYPLAY_*` overrides looked up through `lookup`.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.client.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.client.timeout_ms = Some(parse_var(ENV_TIMEOUT_MS, &timeout)?);
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = parse_var(ENV_PORT, &port)?;
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        KeyplayError::Configuration(format!("{} has invalid value '{}'", name, value))
    })
}
