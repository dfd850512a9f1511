// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody composition engine.
//!
//! Turns [`MelodyParams`] into a [`Melody`]: motifs are generated on the
//! parameters' scale, developed and assembled into a draft under a
//! repetition cap, then refined for uniqueness. Every random decision is
//! drawn from one caller-supplied RNG in a fixed order, so a seed and a
//! parameter set always reproduce the same notes.

pub mod assembler;
pub mod contour;
pub mod develop;
pub mod melody;
pub mod motif;
pub mod optimizer;
pub mod uniqueness;

pub use assembler::{RepetitionLedger, SequenceAssembler};
pub use contour::{generate_contour, Contour};
pub use develop::{develop_motif, Development};
pub use melody::{Melody, MelodySummary};
pub use motif::{Motif, MotifGenerator, PatternHash};
pub use optimizer::{Decision, OptimizationReport, Optimizer};
pub use uniqueness::uniqueness;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::presets::{genre_preset, DEFAULT_GENRE};
use crate::config::{ComposerTuning, MelodyParams, ParamsError};

/// Uniformly choose one element of a non-empty slice
pub(crate) fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

/// Composition engine with a fixed tuning
#[derive(Debug, Clone, Default)]
pub struct Composer {
    tuning: ComposerTuning,
}

impl Composer {
    /// Create a composer with custom tuning
    pub fn new(tuning: ComposerTuning) -> Self {
        Self { tuning }
    }

    /// The tuning in use
    pub fn tuning(&self) -> &ComposerTuning {
        &self.tuning
    }

    /// Validate, assemble a draft and optimize it
    pub fn compose<R: Rng + ?Sized>(
        &self,
        params: &MelodyParams,
        rng: &mut R,
    ) -> Result<Melody, ParamsError> {
        self.compose_with_report(params, rng).map(|(melody, _)| melody)
    }

    /// Like [`Composer::compose`], also returning the optimizer report
    pub fn compose_with_report<R: Rng + ?Sized>(
        &self,
        params: &MelodyParams,
        rng: &mut R,
    ) -> Result<(Melody, OptimizationReport), ParamsError> {
        params.validate()?;
        self.tuning.validate()?;

        let assembler = SequenceAssembler::new(params, &self.tuning);
        info!(
            scale = %assembler.scale(),
            tempo = params.tempo,
            duration_seconds = params.duration_seconds,
            contour = %params.contour,
            "composing melody"
        );
        let draft = assembler.assemble(rng);
        Ok(Optimizer::from_tuning(&self.tuning).optimize_with_report(draft, rng))
    }

    /// Compose with a seeded RNG, or an entropy-seeded one when `seed` is None
    pub fn generate(&self, params: &MelodyParams, seed: Option<u64>) -> Result<Melody, ParamsError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.compose(params, &mut rng)
    }
}

/// Generate a melody with default tuning
pub fn generate(params: &MelodyParams, seed: Option<u64>) -> Result<Melody, ParamsError> {
    Composer::default().generate(params, seed)
}

/// Generate a melody from a genre preset, falling back to the default genre
pub fn generate_for_genre(
    genre: &str,
    duration_seconds: f64,
    root_note: &str,
    seed: Option<u64>,
) -> Result<Melody, ParamsError> {
    let base = genre_preset(genre).unwrap_or_else(|| {
        warn!(genre, fallback = DEFAULT_GENRE, "unknown genre");
        genre_preset(DEFAULT_GENRE).unwrap_or_default()
    });
    let params = MelodyParams {
        duration_seconds,
        root_note: root_note.to_string(),
        ..base
    };
    generate(&params, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_30s() -> MelodyParams {
        MelodyParams {
            root_note: "C".to_string(),
            mode: "major".to_string(),
            tempo: 70,
            duration_seconds: 30.0,
            contour: Contour::Arch,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(&params_30s(), Some(42)).unwrap();
        let b = generate(&params_30s(), Some(42)).unwrap();

        assert!(!a.is_empty());
        assert_eq!(a.notes(), b.notes());
        assert_eq!(a.uniqueness_score(), b.uniqueness_score());
    }

    #[test]
    fn test_score_matches_notes() {
        let melody = generate(&params_30s(), Some(5)).unwrap();
        assert_eq!(melody.uniqueness_score(), uniqueness(melody.notes()));
        assert!((0.0..=1.0).contains(&melody.uniqueness_score()));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = MelodyParams {
            motif_length: 0,
            ..Default::default()
        };
        assert_eq!(generate(&params, Some(1)), Err(ParamsError::EmptyMotif));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let composer = Composer::new(ComposerTuning {
            color_note_probability: 2.0,
            ..Default::default()
        });
        assert!(composer.generate(&params_30s(), Some(1)).is_err());
    }

    #[test]
    fn test_generate_for_genre() {
        for genre in crate::config::available_genres() {
            let melody = generate_for_genre(&genre, 30.0, "D", Some(3)).unwrap();
            assert!(!melody.is_empty(), "{} produced no notes", genre);
            assert_eq!(melody.params().root_note, "D");
        }
    }

    #[test]
    fn test_unknown_genre_falls_back() {
        let fallback = generate_for_genre("polka", 20.0, "C", Some(8)).unwrap();
        let relaxation = generate_for_genre(DEFAULT_GENRE, 20.0, "C", Some(8)).unwrap();
        assert_eq!(fallback, relaxation);
    }

    #[test]
    fn test_report_accounts_for_budget() {
        let composer = Composer::default();
        let mut rng = StdRng::seed_from_u64(12);
        let (melody, report) = composer.compose_with_report(&params_30s(), &mut rng).unwrap();

        assert_eq!(report.iterations(), composer.tuning().optimizer_iterations);
        assert_eq!(report.final_score, melody.uniqueness_score());
    }
}
