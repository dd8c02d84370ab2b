// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Chord and note playback commands.

use anyhow::{Context, Result};
use keyplay::{ClientConfig, PlayClient, PlayHandle, PlayResponse, StatusResponse};

/// Play a chord and wait for the server to answer.
pub async fn chord(config: &ClientConfig, chord: &str) -> Result<()> {
    let client = PlayClient::new(config).context("Failed to create play client")?;
    report(client.play_chord(chord)).await
}

/// Play a note and wait for the server to answer.
pub async fn note(config: &ClientConfig, note: &str, octave: &str) -> Result<()> {
    let client = PlayClient::new(config).context("Failed to create play client")?;
    report(client.play_note(note, octave)).await
}

// The process exits right after, so the request is awaited rather than detached.
async fn report(handle: PlayHandle) -> Result<()> {
    let url = handle.url().to_string();
    let response = handle
        .await
        .with_context(|| format!("Failed to reach playback server at {}", url))?;

    println!("{} {}", response.status, describe(&response));
    Ok(())
}

/// The `status` field of a JSON reply, or the raw body.
fn describe(response: &PlayResponse) -> String {
    serde_json::from_str::<StatusResponse>(&response.body)
        .map(|body| body.status)
        .unwrap_or_else(|_| response.body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_json_status() {
        let response = PlayResponse {
            status: 200,
            body: r#"{"status":"play_chord success"}"#.to_string(),
        };
        assert_eq!(describe(&response), "play_chord success");
    }

    #[test]
    fn test_describe_raw_body() {
        let response = PlayResponse {
            status: 500,
            body: "Internal Server Error\n".to_string(),
        };
        assert_eq!(describe(&response), "Internal Server Error");
    }
}
