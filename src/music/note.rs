// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timed note values.

use serde::{Deserialize, Serialize};

use super::scale::MidiNote;

/// Highest valid MIDI pitch or velocity
pub const MIDI_MAX: i32 = 127;

/// Clamp an arbitrary pitch computation into the MIDI range
pub fn clamp_pitch(pitch: i32) -> MidiNote {
    pitch.clamp(0, MIDI_MAX) as MidiNote
}

/// A single note in a melody.
///
/// Times are in beats. Notes are plain values; transformations build new
/// notes with the `with_*` helpers instead of mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number (0-127)
    pub pitch: MidiNote,
    /// Start time in beats
    pub start_time: f64,
    /// Sounding duration in beats
    pub duration: f64,
    /// Velocity (0-127)
    pub velocity: u8,
}

impl Note {
    /// Create a new note, clamping the pitch into the MIDI range
    pub fn new(pitch: i32, start_time: f64, duration: f64, velocity: u8) -> Self {
        Self {
            pitch: clamp_pitch(pitch),
            start_time,
            duration,
            velocity: velocity.min(MIDI_MAX as u8),
        }
    }

    /// Copy of this note with a different pitch
    pub fn with_pitch(self, pitch: i32) -> Self {
        Self {
            pitch: clamp_pitch(pitch),
            ..self
        }
    }

    /// Copy of this note starting at a different time
    pub fn with_start(self, start_time: f64) -> Self {
        Self { start_time, ..self }
    }

    /// Copy of this note with a different duration
    pub fn with_duration(self, duration: f64) -> Self {
        Self { duration, ..self }
    }

    /// Pitch as a signed value for interval arithmetic
    pub fn pitch_i32(&self) -> i32 {
        i32::from(self.pitch)
    }

    /// Time at which the note stops sounding
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// (pitch, start, duration, velocity) for serialization collaborators
    pub fn to_tuple(&self) -> (MidiNote, f64, f64, u8) {
        (self.pitch, self.start_time, self.duration, self.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation_clamps() {
        let note = Note::new(140, 0.0, 1.0, 200);
        assert_eq!(note.pitch, 127);
        assert_eq!(note.velocity, 127);

        let low = Note::new(-5, 0.0, 1.0, 64);
        assert_eq!(low.pitch, 0);
    }

    #[test]
    fn test_note_builders() {
        let note = Note::new(60, 2.0, 0.5, 70);
        let moved = note.with_start(4.0).with_pitch(62).with_duration(0.75);

        assert_eq!(moved.to_tuple(), (62, 4.0, 0.75, 70));
        assert_eq!(moved.end_time(), 4.75);
        assert_eq!(note.pitch, 60);
    }
}
