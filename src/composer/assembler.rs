// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Draft melody assembly from generated and developed motifs.
//!
//! Each iteration either develops a motif from the pool or originates a new
//! one, then admits it only while its interval pattern is under the
//! repetition cap. Time always advances by at least one measure, so the
//! loop ends after at most `total_beats / beats_per_measure` iterations.

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, trace};

use crate::config::{ComposerTuning, MelodyParams};
use crate::music::{Note, Scale};

use super::contour::Contour;
use super::develop::{develop_motif, Development};
use super::melody::Melody;
use super::motif::{Motif, MotifGenerator, PatternHash};
use super::pick;

/// Consonant transpositions (semitones) for Transposed developments
pub const TRANSPOSITION_OFFSETS: [i32; 5] = [0, 2, 4, 5, 7];

/// Scale degree index that opening motifs start from (the third)
pub const OPENING_DEGREE: usize = 2;

/// Occurrence counts per interval pattern for one generation
#[derive(Debug, Clone, Default)]
pub struct RepetitionLedger {
    counts: HashMap<PatternHash, usize>,
}

impl RepetitionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence and return the new total
    pub fn record(&mut self, pattern: PatternHash) -> usize {
        let count = self.counts.entry(pattern).or_insert(0);
        *count += 1;
        *count
    }

    /// Occurrences recorded so far
    pub fn count(&self, pattern: PatternHash) -> usize {
        self.counts.get(&pattern).copied().unwrap_or(0)
    }

    /// Number of distinct patterns seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Where a candidate motif came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifSource {
    /// Developed from a pool motif
    Developed(Development),
    /// Newly generated with the given contour
    Originated(Contour),
}

/// Builds the draft melody for one parameter set
#[derive(Debug, Clone)]
pub struct SequenceAssembler<'a> {
    params: &'a MelodyParams,
    tuning: &'a ComposerTuning,
    scale: Scale,
}

impl<'a> SequenceAssembler<'a> {
    /// Create an assembler; the scale is mapped from the parameters
    pub fn new(params: &'a MelodyParams, tuning: &'a ComposerTuning) -> Self {
        Self {
            params,
            tuning,
            scale: params.scale(),
        }
    }

    /// The scale motifs are generated on
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Assemble a draft melody until the target duration is filled
    pub fn assemble<R: Rng + ?Sized>(&self, rng: &mut R) -> Melody {
        let params = self.params;
        let generator = MotifGenerator::new(&self.scale, params, self.tuning);
        let opening_pitch = self
            .scale
            .degree(OPENING_DEGREE)
            .unwrap_or_else(|| self.scale.root_pitch());

        let total_beats = params.total_beats();
        let measure = params.beats_per_measure();

        let mut notes: Vec<Note> = Vec::new();
        let mut motifs: Vec<Motif> = Vec::new();
        let mut ledger = RepetitionLedger::new();
        let mut current_time = 0.0;

        let mut pool = vec![generator.generate(
            opening_pitch,
            params.motif_length,
            params.contour,
            rng,
        )];

        while current_time < total_beats {
            let (motif, source) = if params.use_motifs
                && !pool.is_empty()
                && rng.gen::<f64>() < params.development_probability
            {
                let source_motif = &pool[rng.gen_range(0..pool.len())];
                let development = pick(rng, &Development::ALL);
                let transposition = if development == Development::Transposed {
                    pick(rng, &TRANSPOSITION_OFFSETS)
                } else {
                    0
                };
                let developed = develop_motif(
                    source_motif,
                    development,
                    &self.scale,
                    current_time,
                    transposition,
                    self.tuning,
                    rng,
                );
                (developed, MotifSource::Developed(development))
            } else {
                let contour = if rng.gen::<f64>() < self.tuning.contour_override_probability {
                    pick(rng, &Contour::ALL)
                } else {
                    params.contour
                };
                let start_pitch = notes.last().map_or(opening_pitch, Note::pitch_i32);
                let originated = generator.generate(start_pitch, params.motif_length, contour, rng);
                pool.push(originated.clone());
                (originated, MotifSource::Originated(contour))
            };

            let pattern = motif.identity();
            let occurrences = ledger.record(pattern);
            if occurrences <= params.max_repetition {
                trace!(?source, %pattern, time = current_time, "appending motif");
                notes.extend(motif.shifted_to(current_time));
                current_time += motif.duration().max(measure);
                motifs.push(motif);
            } else {
                debug!(?source, %pattern, occurrences, "pattern over repetition cap, discarding");
                current_time += motif.duration().max(measure);
            }
        }

        debug!(
            notes = notes.len(),
            motifs = motifs.len(),
            patterns = ledger.len(),
            pool = pool.len(),
            "draft assembled"
        );
        Melody::new(notes, motifs, params.clone())
    }
}
