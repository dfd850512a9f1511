// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Procedural melody composition.
//!
//! `melodist` turns a key, mode, tempo, duration and contour into a timed
//! sequence of pitched notes built from motifs, then refines it so it does
//! not repeat itself too much.

pub mod composer;
pub mod config;
pub mod music;

pub use composer::{generate, generate_for_genre, Composer, Contour, Melody, MelodySummary};
pub use config::{ComposerTuning, MelodyFile, MelodyParams, ParamsError};
pub use music::{Mode, Note, PitchClass, Scale};
