// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Playback server stub.
//!
//! Serves the play endpoints the client targets and hands each request to a
//! [`PlaybackSink`]. Replies mirror the playback service:
//! `{"status": "play_chord success"}` and `{"status": "play_note success"}`.
//! A note is resolved to its MIDI code before it reaches the sink; unknown
//! names and codes outside `0..=127` get a 422 reply with a `detail` message.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::{KeyplayError, Result};
use crate::pitch;

/// Receives play requests accepted by the server.
pub trait PlaybackSink: Send + Sync + 'static {
    fn play_chord(&self, chord: &str);

    /// `midi` is the resolved code of `note` in `octave`.
    fn play_note(&self, note: &str, octave: i32, midi: u8);
}

/// A play request as seen by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayEvent {
    Chord(String),
    Note { note: String, octave: i32, midi: u8 },
}

/// Sink that only traces what it would play.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl PlaybackSink for LoggingSink {
    fn play_chord(&self, chord: &str) {
        tracing::info!("Playing chord {}", chord);
    }

    fn play_note(&self, note: &str, octave: i32, midi: u8) {
        tracing::info!("Playing note {} {} (midi {})", note, octave, midi);
    }
}

/// Sink that keeps every event, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PlayEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PlayEvent> {
        self.events.lock().clone()
    }
}

impl PlaybackSink for RecordingSink {
    fn play_chord(&self, chord: &str) {
        self.events.lock().push(PlayEvent::Chord(chord.to_string()));
    }

    fn play_note(&self, note: &str, octave: i32, midi: u8) {
        self.events.lock().push(PlayEvent::Note {
            note: note.to_string(),
            octave,
            midi,
        });
    }
}

/// JSON body of a successful play request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Clone)]
struct AppState {
    sink: Arc<dyn PlaybackSink>,
}

/// Build the HTTP router around `sink`.
pub fn router(sink: Arc<dyn PlaybackSink>) -> Router {
    // TraceLayer logs all HTTP requests with method, path, status, and latency
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health))
        .route("/play_chord/{chord}", get(play_chord))
        .route("/play_note/{note}/{octave}", get(play_note))
        .layer(trace_layer)
        .with_state(AppState { sink })
}

async fn health() -> &'static str {
    "ok"
}

async fn play_chord(
    State(state): State<AppState>,
    Path(chord): Path<String>,
) -> Json<StatusResponse> {
    state.sink.play_chord(&chord);
    Json(StatusResponse {
        status: "play_chord success".to_string(),
    })
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn unprocessable(detail: String) -> Rejection {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse { detail }),
    )
}

async fn play_note(
    State(state): State<AppState>,
    Path((note, octave)): Path<(String, String)>,
) -> std::result::Result<Json<StatusResponse>, Rejection> {
    let octave: i32 = octave
        .parse()
        .map_err(|_| unprocessable(format!("octave must be an integer, got '{}'", octave)))?;
    let midi = pitch::midi_code(&note, octave).map_err(unprocessable)?;

    state.sink.play_note(&note, octave, midi);
    Ok(Json(StatusResponse {
        status: "play_note success".to_string(),
    }))
}

/// A running playback server.
pub struct PlaybackServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl PlaybackServer {
    /// Bind `config.host:config.port` and start serving in the background.
    ///
    /// Port `0` picks a free port; see [`local_addr`](Self::local_addr).
    pub async fn bind(config: &ServerConfig, sink: Arc<dyn PlaybackSink>) -> Result<Self> {
        let addr = config.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| KeyplayError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Playback server listening on {}", local_addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let app = router(sink);
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base address a client on this machine can use to reach the server.
    ///
    /// An unspecified bind address (`0.0.0.0`, `::`) maps to loopback.
    pub fn base_url(&self) -> String {
        let ip = match self.local_addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        format!("http://{}", SocketAddr::new(ip, self.local_addr.port()))
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.task
            .await
            .map_err(|e| KeyplayError::Task(e.to_string()))??;
        tracing::info!("Playback server on {} stopped", self.local_addr);
        Ok(())
    }
}
