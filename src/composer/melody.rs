// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The melody produced by the composition engine.

use serde::{Deserialize, Serialize};

use crate::config::MelodyParams;
use crate::music::scale::MidiNote;
use crate::music::{Note, Scale};

use super::motif::Motif;
use super::uniqueness::uniqueness;

/// Complete melody with notes and metadata.
///
/// The stored `uniqueness_score` is written out but never read back;
/// deserializing rescores the notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredMelody")]
pub struct Melody {
    notes: Vec<Note>,
    motifs: Vec<Motif>,
    params: MelodyParams,
    uniqueness_score: f64,
}

#[derive(Deserialize)]
struct StoredMelody {
    notes: Vec<Note>,
    #[serde(default)]
    motifs: Vec<Motif>,
    params: MelodyParams,
}

impl From<StoredMelody> for Melody {
    fn from(stored: StoredMelody) -> Self {
        Melody::new(stored.notes, stored.motifs, stored.params)
    }
}

/// Summary statistics for parameter-learning consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodySummary {
    pub uniqueness_score: f64,
    pub note_count: usize,
    pub motif_count: usize,
    pub params: MelodyParams,
}

impl Melody {
    /// Build a melody, scoring its notes
    pub fn new(notes: Vec<Note>, motifs: Vec<Motif>, params: MelodyParams) -> Self {
        let uniqueness_score = uniqueness(&notes);
        Self {
            notes,
            motifs,
            params,
            uniqueness_score,
        }
    }

    /// Copy of this melody with a replacement note list, rescored
    pub fn with_notes(&self, notes: Vec<Note>) -> Self {
        Melody::new(notes, self.motifs.clone(), self.params.clone())
    }

    /// Notes in insertion order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Motifs whose notes were appended, in order
    pub fn motifs(&self) -> &[Motif] {
        &self.motifs
    }

    /// Parameters the melody was generated from
    pub fn params(&self) -> &MelodyParams {
        &self.params
    }

    /// Uniqueness of the current note list
    pub fn uniqueness_score(&self) -> f64 {
        self.uniqueness_score
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the melody has no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Scale described by the melody's parameters
    pub fn scale(&self) -> Scale {
        self.params.scale()
    }

    /// (pitch, start, duration, velocity) tuples for file writers
    pub fn midi_data(&self) -> Vec<(MidiNote, f64, f64, u8)> {
        self.notes.iter().map(Note::to_tuple).collect()
    }

    /// Latest end time over all notes, in beats
    pub fn duration_beats(&self) -> f64 {
        self.notes.iter().map(Note::end_time).fold(0.0, f64::max)
    }

    /// Summary statistics for learning records
    pub fn summary(&self) -> MelodySummary {
        MelodySummary {
            uniqueness_score: self.uniqueness_score,
            note_count: self.notes.len(),
            motif_count: self.motifs.len(),
            params: self.params.clone(),
        }
    }
}
