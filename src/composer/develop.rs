// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Motif development: related-but-distinct variants of an existing motif.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ComposerTuning;
use crate::music::{Note, Scale};

use super::motif::Motif;
use super::pick;

/// Duration factor of an augmented motif
pub const AUGMENTATION_FACTOR: f64 = 1.5;
/// Duration factor of a diminished motif
pub const DIMINUTION_FACTOR: f64 = 0.75;
/// Pitch jitter applied by a Varied development
pub const VARIATION_STEPS: [i32; 4] = [-2, -1, 1, 2];

/// Ways to develop a motif
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Development {
    /// Repeat exactly
    Exact,
    /// Move to a different pitch, snapped to the scale
    Transposed,
    /// Mirror each interval around the previous new note
    Inverted,
    /// Reverse note order
    Retrograde,
    /// Longer durations
    Augmented,
    /// Shorter durations
    Diminished,
    /// Slight pitch variations
    Varied,
}

impl Development {
    /// All developments
    pub const ALL: [Development; 7] = [
        Development::Exact,
        Development::Transposed,
        Development::Inverted,
        Development::Retrograde,
        Development::Augmented,
        Development::Diminished,
        Development::Varied,
    ];

    /// Name of this development
    pub fn name(self) -> &'static str {
        match self {
            Development::Exact => "exact",
            Development::Transposed => "transposed",
            Development::Inverted => "inverted",
            Development::Retrograde => "retrograde",
            Development::Augmented => "augmented",
            Development::Diminished => "diminished",
            Development::Varied => "varied",
        }
    }
}

impl fmt::Display for Development {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Produce a variant of `motif` whose first note starts at `start_time`.
///
/// `transposition` is only read by [`Development::Transposed`]. Only
/// [`Development::Varied`] draws from `rng`.
pub fn develop_motif<R: Rng + ?Sized>(
    motif: &Motif,
    development: Development,
    scale: &Scale,
    start_time: f64,
    transposition: i32,
    tuning: &ComposerTuning,
    rng: &mut R,
) -> Motif {
    let source = motif.notes();
    let relocated = motif.shifted_to(start_time);
    let mut notes: Vec<Note> = Vec::with_capacity(source.len());

    for (i, note) in relocated.iter().enumerate() {
        let developed = match development {
            Development::Exact | Development::Retrograde => *note,
            Development::Transposed => {
                note.with_pitch(scale.snap(note.pitch_i32() + transposition))
            }
            Development::Inverted => match notes.last() {
                Some(previous) => {
                    let original_interval = source[i].pitch_i32() - source[i - 1].pitch_i32();
                    note.with_pitch(previous.pitch_i32() - original_interval)
                }
                None => *note,
            },
            Development::Augmented => note.with_duration(note.duration * AUGMENTATION_FACTOR),
            Development::Diminished => note.with_duration(note.duration * DIMINUTION_FACTOR),
            Development::Varied => {
                if rng.gen::<f64>() < tuning.variation_probability {
                    let jittered = note.pitch_i32() + pick(rng, &VARIATION_STEPS);
                    note.with_pitch(scale.snap(jittered))
                } else {
                    *note
                }
            }
        };
        notes.push(developed);
    }

    if development == Development::Retrograde {
        notes.reverse();
        let mut current_time = start_time;
        for note in notes.iter_mut() {
            *note = note.with_start(current_time);
            current_time += note.duration;
        }
    }

    Motif::new(notes, motif.contour().to_vec())
}
