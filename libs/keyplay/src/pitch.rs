// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Note name and octave to MIDI code.
//!
//! Note names are single characters from [`CHROMATIC_NOTES`]: upper case for
//! naturals, lower case for the flat of the next natural (`d` is D flat).

/// The twelve note names of one octave, starting at C.
pub const CHROMATIC_NOTES: &str = "CdDeEFfGaAbB";

/// Highest valid MIDI note code.
pub const MIDI_MAX: i32 = 127;

/// Position of `note` within [`CHROMATIC_NOTES`], if it names a note.
pub fn note_index(note: &str) -> Option<i32> {
    let mut chars = note.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    CHROMATIC_NOTES.find(c).map(|i| i as i32)
}

/// Resolve `note` in `octave` to a MIDI code (`octave * 12 + index`).
///
/// Returns a human-readable reason when the note is unknown or the code
/// falls outside `0..=127`.
pub fn midi_code(note: &str, octave: i32) -> Result<u8, String> {
    let index = note_index(note).ok_or_else(|| {
        format!(
            "unknown note '{}', expected one of {}",
            note, CHROMATIC_NOTES
        )
    })?;

    octave
        .checked_mul(12)
        .and_then(|base| base.checked_add(index))
        .filter(|code| (0..=MIDI_MAX).contains(code))
        .map(|code| code as u8)
        .ok_or_else(|| {
            format!(
                "note {} in octave {} is outside the MIDI range 0..={}",
                note, octave, MIDI_MAX
            )
        })
}
