// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Fire-and-forget play requests.
//!
//! Every call logs the request URL, spawns a single GET onto the tokio runtime
//! and returns at once. The returned [`PlayHandle`] may be dropped, which
//! leaves the request running unobserved, or awaited to learn whether the
//! server was reached.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::error::{KeyplayError, Result};
use crate::transport::{HttpTransport, PlayResponse, Transport};
use crate::url::{chord_url, note_url};

/// Client for the playback server.
///
/// Cheap to clone; clones share the transport and base address.
#[derive(Clone)]
pub struct PlayClient {
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    runtime: Handle,
}

impl PlayClient {
    /// Create an HTTP client on the current tokio runtime.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with a custom transport on the current tokio runtime.
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            KeyplayError::Configuration(format!("play client needs a tokio runtime: {}", e))
        })?;
        Ok(Self::with_runtime(config, transport, runtime))
    }

    /// Create a client that spawns its requests onto `runtime`.
    pub fn with_runtime(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        runtime: Handle,
    ) -> Self {
        if config.has_unspecified_host() {
            tracing::warn!(
                "Base address {} targets 0.0.0.0, which is not a valid destination on every platform",
                config.base_url
            );
        }

        Self {
            base_url: Arc::from(config.base_url.as_str()),
            transport,
            runtime,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request playback of `chord` via `GET <base>/play_chord/<chord>`.
    pub fn play_chord(&self, chord: &str) -> PlayHandle {
        self.dispatch(chord_url(&self.base_url, chord))
    }

    /// Request playback of `note` at `octave` via
    /// `GET <base>/play_note/<note>/<octave>`.
    pub fn play_note(&self, note: &str, octave: impl Display) -> PlayHandle {
        self.dispatch(note_url(&self.base_url, note, octave))
    }

    fn dispatch(&self, url: String) -> PlayHandle {
        tracing::info!("{}", url);

        let transport = Arc::clone(&self.transport);
        let request_url = url.clone();
        let task = self.runtime.spawn(async move {
            let result = transport.get(&request_url).await;
            if let Err(e) = &result {
                tracing::debug!("Play request failed: {}", e);
            }
            result
        });

        PlayHandle { url, task }
    }
}

/// A play request in flight.
///
/// Dropping the handle detaches the request. Awaiting it yields the response,
/// or the error that kept the request from reaching the server.
#[must_use = "drop the handle to fire and forget, or await it to observe failures"]
pub struct PlayHandle {
    url: String,
    task: JoinHandle<Result<PlayResponse>>,
}

impl PlayHandle {
    /// The URL this request was sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Cancel the request if it has not completed.
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Future for PlayHandle {
    type Output = Result<PlayResponse>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.task).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) => Err(KeyplayError::Task(e.to_string())),
        })
    }
}
