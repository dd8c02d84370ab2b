// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Play request URL construction.
//!
//! Identifiers are concatenated as-is. Nothing is percent-encoded, so chord or
//! note names containing `/`, `?`, `#` or spaces change the meaning of the
//! request (`C#m` reaches the server as `C`, with `#m` as a fragment).

use std::fmt::Display;

/// Path prefix of the chord endpoint.
pub const PLAY_CHORD_PATH: &str = "/play_chord/";

/// Path prefix of the note endpoint.
pub const PLAY_NOTE_PATH: &str = "/play_note/";

/// `<base>/play_chord/<chord>`
pub fn chord_url(base: &str, chord: &str) -> String {
    format!("{}{}{}", base, PLAY_CHORD_PATH, chord)
}

/// `<base>/play_note/<note>/<octave>`
pub fn note_url(base: &str, note: &str, octave: impl Display) -> String {
    format!("{}{}{}/{}", base, PLAY_NOTE_PATH, note, octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:8001";

    #[test]
    fn test_chord_url() {
        assert_eq!(
            chord_url(BASE, "Cmaj7"),
            "http://127.0.0.1:8001/play_chord/Cmaj7"
        );
    }

    #[test]
    fn test_chord_url_matches_concatenation() {
        for chord in ["C", "Am", "CEG", "Dm7b5", "fAc", "G7sus4"] {
            assert_eq!(
                chord_url(BASE, chord),
                format!("{}/play_chord/{}", BASE, chord)
            );
        }
    }

    #[test]
    fn test_chord_url_is_not_escaped() {
        assert_eq!(
            chord_url(BASE, "C#m"),
            "http://127.0.0.1:8001/play_chord/C#m"
        );
        assert_eq!(
            chord_url(BASE, "C maj/E"),
            "http://127.0.0.1:8001/play_chord/C maj/E"
        );
    }

    #[test]
    fn test_empty_chord() {
        assert_eq!(chord_url(BASE, ""), "http://127.0.0.1:8001/play_chord/");
    }

    #[test]
    fn test_note_url() {
        assert_eq!(note_url(BASE, "A", 4), "http://127.0.0.1:8001/play_note/A/4");
    }

    #[test]
    fn test_note_url_octave_as_string() {
        assert_eq!(
            note_url(BASE, "f", "5"),
            "http://127.0.0.1:8001/play_note/f/5"
        );
    }

    #[test]
    fn test_note_url_without_validation() {
        assert_eq!(note_url(BASE, "", -1), "http://127.0.0.1:8001/play_note//-1");
        assert_eq!(
            note_url(BASE, "H", 99),
            "http://127.0.0.1:8001/play_note/H/99"
        );
    }
}
