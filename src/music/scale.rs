// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale mapping for melody generation.
//!
//! Maps a root pitch class name, a mode name and an octave onto an ordered
//! set of absolute MIDI pitches, and snaps arbitrary pitches onto that set.
//! Name lookups never fail: unknown roots resolve to C and unknown modes to
//! major, so a bad preset name cannot abort generation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// MIDI pitch of C4 (middle C)
pub const MIDDLE_C: i32 = 60;

/// Octave number of middle C
pub const MIDDLE_C_OCTAVE: i32 = 4;

/// Pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Get the semitone offset (0-11) above C
    pub fn semitone(self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Get pitch class from a semitone offset
    pub fn from_semitone(semitone: i32) -> Self {
        PitchClass::ALL[semitone.rem_euclid(12) as usize]
    }

    /// Look up a pitch class by name ("C", "C#", "Db", ...).
    ///
    /// Case-sensitive: "db" is not a pitch class name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "C" => Some(PitchClass::C),
            "C#" | "Db" => Some(PitchClass::Cs),
            "D" => Some(PitchClass::D),
            "D#" | "Eb" => Some(PitchClass::Ds),
            "E" => Some(PitchClass::E),
            "F" => Some(PitchClass::F),
            "F#" | "Gb" => Some(PitchClass::Fs),
            "G" => Some(PitchClass::G),
            "G#" | "Ab" => Some(PitchClass::Gs),
            "A" => Some(PitchClass::A),
            "A#" | "Bb" => Some(PitchClass::As),
            "B" => Some(PitchClass::B),
            _ => None,
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchClass::C => write!(f, "C"),
            PitchClass::Cs => write!(f, "C#"),
            PitchClass::D => write!(f, "D"),
            PitchClass::Ds => write!(f, "D#"),
            PitchClass::E => write!(f, "E"),
            PitchClass::F => write!(f, "F"),
            PitchClass::Fs => write!(f, "F#"),
            PitchClass::G => write!(f, "G"),
            PitchClass::Gs => write!(f, "G#"),
            PitchClass::A => write!(f, "A"),
            PitchClass::As => write!(f, "A#"),
            PitchClass::B => write!(f, "B"),
        }
    }
}

/// Modes supported by the melody engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    Minor, // Natural minor
    PentatonicMajor,
    PentatonicMinor,
    Dorian,
}

impl Mode {
    /// All modes
    pub const ALL: [Mode; 5] = [
        Mode::Major,
        Mode::Minor,
        Mode::PentatonicMajor,
        Mode::PentatonicMinor,
        Mode::Dorian,
    ];

    /// Get the intervals (semitones from root) for this mode
    pub fn intervals(self) -> &'static [i32] {
        match self {
            Mode::Major => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Mode::PentatonicMajor => &[0, 2, 4, 7, 9],
            Mode::PentatonicMinor => &[0, 3, 5, 7, 10],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
        }
    }

    /// Look up a mode by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "major" => Some(Mode::Major),
            "minor" => Some(Mode::Minor),
            "pentatonic_major" => Some(Mode::PentatonicMajor),
            "pentatonic_minor" => Some(Mode::PentatonicMinor),
            "dorian" => Some(Mode::Dorian),
            _ => None,
        }
    }

    /// Configuration name of this mode
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::PentatonicMajor => "pentatonic_major",
            Mode::PentatonicMinor => "pentatonic_minor",
            Mode::Dorian => "dorian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scale rooted in a specific octave, as absolute MIDI pitches
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: PitchClass,
    mode: Mode,
    octave: i32,
    pitches: Vec<i32>,
}

impl Scale {
    /// Create a scale from a root, mode and octave
    pub fn new(root: PitchClass, mode: Mode, octave: i32) -> Self {
        let root_pitch = MIDDLE_C + root.semitone() + (octave - MIDDLE_C_OCTAVE) * 12;
        let pitches = mode.intervals().iter().map(|&i| root_pitch + i).collect();

        Self {
            root,
            mode,
            octave,
            pitches,
        }
    }

    /// Map names onto a scale, falling back to C and major on unknown names
    pub fn map(root_name: &str, mode_name: &str, octave: i32) -> Self {
        let root = PitchClass::from_name(root_name).unwrap_or_else(|| {
            debug!(root = root_name, "unknown root note, using C");
            PitchClass::C
        });
        let mode = Mode::from_name(mode_name).unwrap_or_else(|| {
            debug!(mode = mode_name, "unknown mode, using major");
            Mode::Major
        });
        Scale::new(root, mode, octave)
    }

    /// Get the absolute pitches, ascending
    pub fn pitches(&self) -> &[i32] {
        &self.pitches
    }

    /// Get the number of pitches in this scale
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Check if this scale is empty (shouldn't happen normally)
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Absolute pitch of the root
    pub fn root_pitch(&self) -> i32 {
        self.pitches.first().copied().unwrap_or(MIDDLE_C)
    }

    /// Pitch at a 0-based degree index, if the scale has that many notes
    pub fn degree(&self, index: usize) -> Option<i32> {
        self.pitches.get(index).copied()
    }

    /// Check if an absolute pitch is one of this scale's pitches
    pub fn contains(&self, pitch: i32) -> bool {
        self.pitches.contains(&pitch)
    }

    /// Snap a pitch to the nearest scale member.
    ///
    /// Ties resolve to the lower pitch. Pitches outside the scale's range snap
    /// to its lowest or highest member.
    pub fn snap(&self, pitch: i32) -> i32 {
        let mut nearest = match self.pitches.first() {
            Some(&p) => p,
            None => return pitch,
        };
        for &candidate in &self.pitches[1..] {
            if (candidate - pitch).abs() < (nearest - pitch).abs() {
                nearest = candidate;
            }
        }
        nearest
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.root, self.octave, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_semitone() {
        assert_eq!(PitchClass::C.semitone(), 0);
        assert_eq!(PitchClass::A.semitone(), 9);
        assert_eq!(PitchClass::B.semitone(), 11);
        assert_eq!(PitchClass::from_semitone(-1), PitchClass::B);
        assert_eq!(PitchClass::from_semitone(14), PitchClass::D);
    }

    #[test]
    fn test_pitch_class_from_name() {
        assert_eq!(PitchClass::from_name("C"), Some(PitchClass::C));
        assert_eq!(PitchClass::from_name("C#"), Some(PitchClass::Cs));
        assert_eq!(PitchClass::from_name("Db"), Some(PitchClass::Cs));
        assert_eq!(PitchClass::from_name("Bb"), Some(PitchClass::As));
        assert_eq!(PitchClass::from_name("db"), None);
        assert_eq!(PitchClass::from_name("Z"), None);
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(Mode::from_name("major"), Some(Mode::Major));
        assert_eq!(Mode::from_name("pentatonic_minor"), Some(Mode::PentatonicMinor));
        assert_eq!(Mode::from_name("bogus"), None);
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.name()), Some(mode));
        }
    }

    #[test]
    fn test_c_major_octave_4() {
        let scale = Scale::map("C", "major", 4);
        assert_eq!(scale.pitches(), &[60, 62, 64, 65, 67, 69, 71]);
    }

    #[test]
    fn test_octave_shift() {
        let scale = Scale::map("A", "minor", 5);
        assert_eq!(scale.pitches(), &[81, 83, 84, 86, 88, 89, 91]);

        let low = Scale::map("C", "pentatonic_major", 3);
        assert_eq!(low.pitches(), &[48, 50, 52, 55, 57]);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let fallback = Scale::map("Z", "bogus", 4);
        let reference = Scale::map("C", "major", 4);
        assert_eq!(fallback, reference);
    }

    #[test]
    fn test_snap_to_nearest() {
        let c_major = Scale::map("C", "major", 4);

        assert_eq!(c_major.snap(60), 60);
        assert_eq!(c_major.snap(66), 65); // tie between F and G resolves low
        assert_eq!(c_major.snap(70), 69);
        assert_eq!(c_major.snap(40), 60);
        assert_eq!(c_major.snap(90), 71);
    }

    #[test]
    fn test_contains_and_degree() {
        let d_dorian = Scale::map("D", "dorian", 4);
        assert!(d_dorian.contains(62));
        assert!(d_dorian.contains(71));
        assert!(!d_dorian.contains(63));
        assert_eq!(d_dorian.degree(2), Some(65));
        assert_eq!(d_dorian.degree(7), None);
        assert_eq!(d_dorian.root_pitch(), 62);
    }
}
