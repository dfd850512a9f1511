// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for melodist.
//!
//! This module provides the melody parameter record, the tunable
//! probabilities of the composition engine, and YAML loading for both.

pub mod presets;

pub use presets::{available_genres, genre_preset};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composer::contour::Contour;
use crate::music::Scale;

/// Chance that a generated note keeps its raw, out-of-scale pitch
pub const COLOR_NOTE_PROBABILITY: f64 = 0.1;
/// Chance that a note of a Varied development is jittered
pub const VARIATION_PROBABILITY: f64 = 0.3;
/// Chance that a freshly generated motif ignores the configured contour
pub const CONTOUR_OVERRIDE_PROBABILITY: f64 = 0.3;
/// Chance that the optimizer accepts a mutation that did not improve the score
pub const WORSE_ACCEPTANCE_PROBABILITY: f64 = 0.1;
/// Default optimizer iteration budget
pub const OPTIMIZER_ITERATIONS: usize = 10;

/// Invalid melody configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("tempo must be a positive BPM value, got {0}")]
    InvalidTempo(u32),
    #[error("duration_seconds must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("motif_length must be at least 1")]
    EmptyMotif,
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("legato must be positive, got {0}")]
    InvalidLegato(f64),
    #[error("velocity_range must satisfy min <= max <= 127, got ({0}, {1})")]
    InvalidVelocityRange(u8, u8),
    #[error("time signature numerator must be at least 1")]
    InvalidTimeSignature,
}

/// Parameters for melody generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MelodyParams {
    /// Root pitch class name (e.g., "C", "F#", "Bb"); unknown names mean C
    #[serde(default = "default_root_note")]
    pub root_note: String,
    /// Mode name (e.g., "major", "dorian"); unknown names mean major
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    /// Target length in seconds
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,
    /// Octave of the scale root (middle C is octave 4)
    #[serde(default = "default_octave")]
    pub octave: i32,
    /// Preferred melodic contour
    #[serde(default)]
    pub contour: Contour,
    /// Notes per beat hint (0.0 - 1.0), carried for downstream consumers
    #[serde(default = "default_note_density")]
    pub note_density: f64,
    /// Reuse and develop earlier motifs
    #[serde(default = "default_true")]
    pub use_motifs: bool,
    /// Notes per motif
    #[serde(default = "default_motif_length")]
    pub motif_length: usize,
    /// Chance of developing an earlier motif instead of writing a new one
    #[serde(default = "default_development_probability")]
    pub development_probability: f64,
    /// Maximum number of appended motifs sharing one interval signature
    #[serde(default = "default_max_repetition")]
    pub max_repetition: usize,
    /// Variation hint (0.0 - 1.0), carried for downstream consumers
    #[serde(default = "default_variation_amount")]
    pub variation_amount: f64,
    /// Time signature (beats per measure, beat unit)
    #[serde(default = "default_time_signature")]
    pub time_signature: (u8, u8),
    /// Off-beat duration probability (0.0 - 1.0)
    #[serde(default = "default_syncopation")]
    pub syncopation: f64,
    /// Inclusive (min, max) velocity
    #[serde(default = "default_velocity_range")]
    pub velocity_range: (u8, u8),
    /// Sounding duration factor; below 1 separates notes, above 1 overlaps
    #[serde(default = "default_legato")]
    pub legato: f64,
}

fn default_root_note() -> String {
    "C".to_string()
}
fn default_mode() -> String {
    "major".to_string()
}
fn default_tempo() -> u32 {
    70
}
fn default_duration_seconds() -> f64 {
    60.0
}
fn default_octave() -> i32 {
    5
}
fn default_note_density() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}
fn default_motif_length() -> usize {
    4
}
fn default_development_probability() -> f64 {
    0.6
}
fn default_max_repetition() -> usize {
    2
}
fn default_variation_amount() -> f64 {
    0.3
}
fn default_time_signature() -> (u8, u8) {
    (4, 4)
}
fn default_syncopation() -> f64 {
    0.2
}
fn default_velocity_range() -> (u8, u8) {
    (50, 80)
}
fn default_legato() -> f64 {
    0.7
}

impl Default for MelodyParams {
    fn default() -> Self {
        Self {
            root_note: default_root_note(),
            mode: default_mode(),
            tempo: default_tempo(),
            duration_seconds: default_duration_seconds(),
            octave: default_octave(),
            contour: Contour::default(),
            note_density: default_note_density(),
            use_motifs: true,
            motif_length: default_motif_length(),
            development_probability: default_development_probability(),
            max_repetition: default_max_repetition(),
            variation_amount: default_variation_amount(),
            time_signature: default_time_signature(),
            syncopation: default_syncopation(),
            velocity_range: default_velocity_range(),
            legato: default_legato(),
        }
    }
}

impl MelodyParams {
    /// Check for configurations that indicate a programming error.
    ///
    /// Unknown root or mode names are not errors; they fall back when the
    /// scale is built.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.tempo == 0 {
            return Err(ParamsError::InvalidTempo(self.tempo));
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(ParamsError::InvalidDuration(self.duration_seconds));
        }
        if self.motif_length < 1 {
            return Err(ParamsError::EmptyMotif);
        }
        check_probability("development_probability", self.development_probability)?;
        check_probability("syncopation", self.syncopation)?;
        if !(self.legato > 0.0 && self.legato.is_finite()) {
            return Err(ParamsError::InvalidLegato(self.legato));
        }
        let (min_velocity, max_velocity) = self.velocity_range;
        if min_velocity > max_velocity || max_velocity > 127 {
            return Err(ParamsError::InvalidVelocityRange(min_velocity, max_velocity));
        }
        if self.time_signature.0 == 0 {
            return Err(ParamsError::InvalidTimeSignature);
        }
        Ok(())
    }

    /// The scale these parameters describe
    pub fn scale(&self) -> Scale {
        Scale::map(&self.root_note, &self.mode, self.octave)
    }

    /// Whole beats that fit into `duration_seconds` at `tempo`
    pub fn total_beats(&self) -> f64 {
        (self.duration_seconds * f64::from(self.tempo) / 60.0).floor()
    }

    /// Beats in one measure
    pub fn beats_per_measure(&self) -> f64 {
        f64::from(self.time_signature.0.max(1))
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::ProbabilityOutOfRange { name, value })
    }
}

/// Tunable probabilities and budgets of the composition engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComposerTuning {
    /// Chance of keeping a raw out-of-scale pitch in a new motif
    #[serde(default = "default_color_note_probability")]
    pub color_note_probability: f64,
    /// Chance of jittering each note of a Varied development
    #[serde(default = "default_variation_probability")]
    pub variation_probability: f64,
    /// Chance of picking a random contour for a new motif
    #[serde(default = "default_contour_override_probability")]
    pub contour_override_probability: f64,
    /// Chance of accepting a non-improving optimizer mutation
    #[serde(default = "default_worse_acceptance_probability")]
    pub worse_acceptance_probability: f64,
    /// Optimizer iteration budget
    #[serde(default = "default_optimizer_iterations")]
    pub optimizer_iterations: usize,
}

fn default_color_note_probability() -> f64 {
    COLOR_NOTE_PROBABILITY
}
fn default_variation_probability() -> f64 {
    VARIATION_PROBABILITY
}
fn default_contour_override_probability() -> f64 {
    CONTOUR_OVERRIDE_PROBABILITY
}
fn default_worse_acceptance_probability() -> f64 {
    WORSE_ACCEPTANCE_PROBABILITY
}
fn default_optimizer_iterations() -> usize {
    OPTIMIZER_ITERATIONS
}

impl Default for ComposerTuning {
    fn default() -> Self {
        Self {
            color_note_probability: COLOR_NOTE_PROBABILITY,
            variation_probability: VARIATION_PROBABILITY,
            contour_override_probability: CONTOUR_OVERRIDE_PROBABILITY,
            worse_acceptance_probability: WORSE_ACCEPTANCE_PROBABILITY,
            optimizer_iterations: OPTIMIZER_ITERATIONS,
        }
    }
}

impl ComposerTuning {
    /// Check that every probability lies within [0, 1]
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_probability("color_note_probability", self.color_note_probability)?;
        check_probability("variation_probability", self.variation_probability)?;
        check_probability(
            "contour_override_probability",
            self.contour_override_probability,
        )?;
        check_probability(
            "worse_acceptance_probability",
            self.worse_acceptance_probability,
        )
    }
}

/// Root document of a melody configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MelodyFile {
    /// Melody parameters
    #[serde(default)]
    pub params: MelodyParams,
    /// Engine tuning overrides
    #[serde(default)]
    pub tuning: ComposerTuning,
}

impl MelodyFile {
    /// Load a melody configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a melody configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check both sections for invalid values
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.params.validate()?;
        self.tuning.validate()
    }
}

/// Load and validate a melody configuration file
pub fn load_melody_file<P: AsRef<Path>>(path: P) -> Result<MelodyFile> {
    let file = MelodyFile::load(path.as_ref())?;
    file.validate()
        .with_context(|| format!("Invalid melody configuration: {:?}", path.as_ref()))?;
    Ok(file)
}
