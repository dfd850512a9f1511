// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Motifs and motif generation.
//!
//! A motif is a short run of notes produced as one unit. Its identity is
//! derived from its interval signature only, so a transposed copy counts
//! as the same pattern while an inversion or retrograde does not.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{ComposerTuning, MelodyParams};
use crate::music::{Note, Scale};

use super::contour::{generate_contour, Contour};
use super::pick;

/// Durations (beats) chosen for syncopated notes
pub const SYNCOPATED_DURATIONS: [f64; 2] = [0.5, 0.75];
/// Durations (beats) chosen for on-beat notes
pub const ON_BEAT_DURATIONS: [f64; 3] = [0.5, 1.0, 1.5];

/// Pitch-independent identity of an interval signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternHash(u64);

impl PatternHash {
    /// Hash an interval signature
    pub fn of(signature: &[i32]) -> Self {
        let mut hasher = Sha256::new();
        for interval in signature {
            hasher.update(interval.to_be_bytes());
        }
        let digest = hasher.finalize();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        PatternHash(u64::from_be_bytes(prefix))
    }
}

impl fmt::Display for PatternHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0.to_be_bytes()))
    }
}

/// A melodic motif (short musical idea)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motif {
    notes: Vec<Note>,
    /// Contour steps the motif was drawn from
    contour: Vec<i32>,
}

impl Motif {
    /// Create a motif from notes and the contour that produced them
    pub fn new(notes: Vec<Note>, contour: Vec<i32>) -> Self {
        Self { notes, contour }
    }

    /// Notes in this motif
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Contour steps the motif was drawn from
    pub fn contour(&self) -> &[i32] {
        &self.contour
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the motif has no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Differences between consecutive pitches
    pub fn interval_signature(&self) -> Vec<i32> {
        self.notes
            .windows(2)
            .map(|pair| pair[1].pitch_i32() - pair[0].pitch_i32())
            .collect()
    }

    /// Repetition identity, a function of the interval signature alone
    pub fn identity(&self) -> PatternHash {
        PatternHash::of(&self.interval_signature())
    }

    /// Sum of the sounding durations of all notes
    pub fn duration(&self) -> f64 {
        self.notes.iter().map(|n| n.duration).sum()
    }

    /// Notes relocated so the first one starts at `start_time`
    pub fn shifted_to(&self, start_time: f64) -> Vec<Note> {
        let origin = self.notes.first().map_or(0.0, |n| n.start_time);
        self.notes
            .iter()
            .map(|n| n.with_start(start_time + (n.start_time - origin)))
            .collect()
    }
}

/// Builds new motifs on a scale
#[derive(Debug, Clone, Copy)]
pub struct MotifGenerator<'a> {
    scale: &'a Scale,
    params: &'a MelodyParams,
    tuning: &'a ComposerTuning,
}

impl<'a> MotifGenerator<'a> {
    /// Create a generator for one scale and parameter set
    pub fn new(scale: &'a Scale, params: &'a MelodyParams, tuning: &'a ComposerTuning) -> Self {
        Self {
            scale,
            params,
            tuning,
        }
    }

    /// Generate a motif of `length` notes starting near `start_pitch`.
    ///
    /// The first note is already one contour step away from `start_pitch`.
    /// Times start at 0; callers relocate the notes.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        start_pitch: i32,
        length: usize,
        contour: Contour,
        rng: &mut R,
    ) -> Motif {
        let steps = generate_contour(contour, length, rng);
        let (min_velocity, max_velocity) = ordered(self.params.velocity_range);

        let mut notes = Vec::with_capacity(steps.len());
        let mut current_pitch = start_pitch;
        let mut current_time = 0.0;

        for &step in &steps {
            let target = current_pitch + step;
            let pitch = if rng.gen::<f64>() < self.tuning.color_note_probability {
                target
            } else {
                self.scale.snap(target)
            };

            let duration = if rng.gen::<f64>() < self.params.syncopation {
                pick(rng, &SYNCOPATED_DURATIONS)
            } else {
                pick(rng, &ON_BEAT_DURATIONS)
            };
            let velocity = rng.gen_range(min_velocity..=max_velocity);

            let note = Note::new(pitch, current_time, duration * self.params.legato, velocity);
            current_pitch = note.pitch_i32();
            current_time += duration;
            notes.push(note);
        }

        Motif::new(notes, steps)
    }
}

fn ordered((a, b): (u8, u8)) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn note(pitch: i32, start: f64) -> Note {
        Note::new(pitch, start, 1.0, 64)
    }

    #[test]
    fn test_interval_signature() {
        let motif = Motif::new(
            vec![note(60, 0.0), note(64, 1.0), note(62, 2.0), note(67, 3.0)],
            vec![],
        );
        assert_eq!(motif.interval_signature(), vec![4, -2, 5]);
        assert_eq!(motif.duration(), 4.0);
    }

    #[test]
    fn test_identity_ignores_absolute_pitch() {
        let low = Motif::new(vec![note(60, 0.0), note(62, 1.0), note(59, 2.0)], vec![]);
        let high = Motif::new(vec![note(72, 8.0), note(74, 9.5), note(71, 10.0)], vec![]);
        let inverted = Motif::new(vec![note(60, 0.0), note(58, 1.0), note(61, 2.0)], vec![]);

        assert_eq!(low.identity(), high.identity());
        assert_ne!(low.identity(), inverted.identity());
        assert_eq!(low.identity().to_string().len(), 16);
    }

    #[test]
    fn test_shifted_to() {
        let motif = Motif::new(vec![note(60, 2.0), note(62, 3.5)], vec![]);
        let shifted = motif.shifted_to(10.0);
        assert_eq!(shifted[0].start_time, 10.0);
        assert_eq!(shifted[1].start_time, 11.5);
    }

    #[test]
    fn test_generated_motif_is_well_formed() {
        let params = MelodyParams::default();
        let tuning = ComposerTuning::default();
        let scale = params.scale();
        let generator = MotifGenerator::new(&scale, &params, &tuning);
        let mut rng = StdRng::seed_from_u64(42);

        for contour in Contour::ALL {
            let motif = generator.generate(scale.pitches()[0], 4, contour, &mut rng);
            assert_eq!(motif.len(), 4);
            assert_eq!(motif.contour().len(), 4);
            for n in motif.notes() {
                assert!((36..=96).contains(&n.pitch));
                assert!(n.duration > 0.0);
                assert!((50..=80).contains(&n.velocity));
            }
        }
    }

    #[test]
    fn test_without_color_notes_pitches_stay_in_scale() {
        let params = MelodyParams::default();
        let tuning = ComposerTuning {
            color_note_probability: 0.0,
            ..Default::default()
        };
        let scale = params.scale();
        let generator = MotifGenerator::new(&scale, &params, &tuning);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..50 {
            let motif = generator.generate(scale.pitches()[2], 6, Contour::Wave, &mut rng);
            assert!(motif.notes().iter().all(|n| scale.contains(n.pitch_i32())));
        }
    }

    #[test]
    fn test_legato_scales_sounding_duration() {
        let params = MelodyParams {
            legato: 0.5,
            syncopation: 0.0,
            ..Default::default()
        };
        let tuning = ComposerTuning::default();
        let scale = params.scale();
        let generator = MotifGenerator::new(&scale, &params, &tuning);
        let mut rng = StdRng::seed_from_u64(21);

        let motif = generator.generate(scale.pitches()[0], 8, Contour::Static, &mut rng);
        for pair in motif.notes().windows(2) {
            let step = pair[1].start_time - pair[0].start_time;
            assert!((pair[0].duration - step * 0.5).abs() < 1e-9);
            assert!(ON_BEAT_DURATIONS.contains(&step));
        }
    }
}
