// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for melodist.
//!
//! This module provides scale mapping and the note value type shared by
//! the composition engine and its consumers.

pub mod note;
pub mod scale;

pub use note::Note;
pub use scale::{Mode, PitchClass, Scale};
