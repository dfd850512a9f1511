// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named genre presets.

use crate::composer::contour::Contour;

use super::MelodyParams;

/// Genre names with a preset, in display order
pub const GENRES: [&str; 5] = ["relaxation", "ambient", "meditation", "lofi", "classical"];

/// Genre used when a requested genre is unknown
pub const DEFAULT_GENRE: &str = "relaxation";

/// List all genres that have a preset
pub fn available_genres() -> Vec<String> {
    GENRES.iter().map(|s| s.to_string()).collect()
}

/// Get the preset parameters for a genre
pub fn genre_preset(genre: &str) -> Option<MelodyParams> {
    let base = MelodyParams::default();
    let params = match genre {
        "relaxation" => MelodyParams {
            tempo: 65,
            mode: "major".to_string(),
            contour: Contour::Arch,
            note_density: 0.4,
            syncopation: 0.1,
            velocity_range: (40, 65),
            legato: 0.9,
            ..base
        },
        "ambient" => MelodyParams {
            tempo: 60,
            mode: "dorian".to_string(),
            contour: Contour::Wave,
            note_density: 0.3,
            syncopation: 0.2,
            velocity_range: (35, 55),
            legato: 1.0,
            ..base
        },
        "meditation" => MelodyParams {
            tempo: 50,
            mode: "pentatonic_major".to_string(),
            contour: Contour::Static,
            note_density: 0.2,
            syncopation: 0.05,
            velocity_range: (30, 50),
            legato: 1.0,
            ..base
        },
        "lofi" => MelodyParams {
            tempo: 75,
            mode: "minor".to_string(),
            contour: Contour::Descending,
            note_density: 0.5,
            syncopation: 0.4,
            velocity_range: (50, 75),
            legato: 0.7,
            ..base
        },
        "classical" => MelodyParams {
            tempo: 80,
            mode: "major".to_string(),
            contour: Contour::Arch,
            note_density: 0.6,
            syncopation: 0.15,
            velocity_range: (45, 90),
            legato: 0.8,
            use_motifs: true,
            development_probability: 0.7,
            ..base
        },
        _ => return None,
    };
    Some(params)
}
