// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Network seam between the play client and the playback server.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::{KeyplayError, Result};

/// Outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayResponse {
    /// HTTP status code. Non-2xx statuses are still a completed request.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl PlayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a bare GET: no headers, no body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, url: &str) -> Result<PlayResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport. Without a timeout, requests wait as long as the
    /// connection does.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            KeyplayError::Configuration(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest` client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<PlayResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| request_error(url, e))?;

        Ok(PlayResponse { status, body })
    }
}

fn request_error(url: &str, source: reqwest::Error) -> KeyplayError {
    // A malformed URL never left the process; it is not a network failure.
    if source.is_builder() {
        KeyplayError::Configuration(format!("invalid request URL '{}': {}", url, source))
    } else if source.is_timeout() {
        KeyplayError::Timeout {
            url: url.to_string(),
        }
    } else {
        KeyplayError::Network {
            url: url.to_string(),
            source,
        }
    }
}

/// In-memory transport that records every requested URL.
///
/// Used as the mocked network layer in tests.
pub struct RecordingTransport {
    requests: Mutex<Vec<String>>,
    notify: Notify,
    status: u16,
    time_out: bool,
}

impl RecordingTransport {
    /// Answer every request with `200` and an empty body.
    pub fn new() -> Self {
        Self::with_status(200)
    }

    /// Answer every request with `status`.
    pub fn with_status(status: u16) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            notify: Notify::new(),
            status,
            time_out: false,
        }
    }

    /// Record every request, then fail it with [`KeyplayError::Timeout`].
    pub fn timing_out() -> Self {
        Self {
            time_out: true,
            ..Self::new()
        }
    }

    /// URLs requested so far, in completion order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Wait until at least `count` requests have been recorded.
    pub async fn wait_for_requests(&self, count: usize) -> Vec<String> {
        loop {
            // Register before checking so a request landing in between still wakes us.
            let notified = self.notify.notified();
            {
                let requests = self.requests.lock();
                if requests.len() >= count {
                    return requests.clone();
                }
            }
            notified.await;
        }
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str) -> Result<PlayResponse> {
        self.requests.lock().push(url.to_string());
        self.notify.notify_waiters();

        if self.time_out {
            return Err(KeyplayError::Timeout {
                url: url.to_string(),
            });
        }

        Ok(PlayResponse {
            status: self.status,
            body: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_builds_with_and_without_timeout() {
        assert!(HttpTransport::new(None).is_ok());
        assert!(HttpTransport::new(Some(Duration::from_millis(250))).is_ok());
    }

    #[tokio::test]
    async fn test_recording_transport_records_urls() {
        let transport = RecordingTransport::new();
        let response = transport.get("http://h/play_chord/C").await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(transport.requests(), vec!["http://h/play_chord/C"]);
    }

    #[tokio::test]
    async fn test_recording_transport_non_success_status_is_ok() {
        let transport = RecordingTransport::with_status(500);
        let response = transport.get("http://h/play_note/A/4").await.unwrap();

        assert_eq!(response.status, 500);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_recording_transport_timing_out() {
        let transport = RecordingTransport::timing_out();
        let result = transport.get("http://h/play_chord/C").await;

        assert!(matches!(result, Err(KeyplayError::Timeout { .. })));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_http_transport_unreachable_is_network_error() {
        // Port 1 on loopback is not listening in test environments.
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let transport = HttpTransport::from_client(client);
        let result = transport.get("http://127.0.0.1:1/play_chord/C").await;

        match result {
            Err(KeyplayError::Network { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:1/play_chord/C");
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_transport_url_without_scheme_is_configuration_error() {
        let transport = HttpTransport::new(None).unwrap();
        let result = transport.get("localhost:8001/play_chord/C").await;

        assert!(matches!(result, Err(KeyplayError::Configuration(_))));
    }
}
