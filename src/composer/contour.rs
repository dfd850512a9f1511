// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melodic contour shapes.
//!
//! A contour is produced as signed semitone steps, not absolute pitches;
//! the motif generator walks the steps and snaps the result to a scale.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pick;

/// Rising steps of an arch
pub const ARCH_RISE_STEPS: [i32; 3] = [1, 2, 3];
/// Falling steps of an arch
pub const ARCH_FALL_STEPS: [i32; 3] = [-1, -2, -3];
/// Descending steps, weighted toward -1 with an occasional repeat
pub const DESCENDING_STEPS: [i32; 4] = [-1, -2, 0, -1];
/// Ascending steps, weighted toward +1 with an occasional repeat
pub const ASCENDING_STEPS: [i32; 4] = [1, 2, 0, 1];
/// Wave step magnitudes
pub const WAVE_MAGNITUDES: [i32; 2] = [1, 2];
/// Steps of a wave taken before the direction flips
pub const WAVE_PERIOD: usize = 3;
/// Static steps, weighted toward 0
pub const STATIC_STEPS: [i32; 4] = [-1, 0, 1, 0];

/// Melodic contour types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contour {
    /// Rise then fall
    #[default]
    Arch,
    /// Gradual descent
    Descending,
    /// Gradual rise
    Ascending,
    /// Direction flips every few steps
    Wave,
    /// Minimal movement
    Static,
}

impl Contour {
    /// All contours
    pub const ALL: [Contour; 5] = [
        Contour::Arch,
        Contour::Descending,
        Contour::Ascending,
        Contour::Wave,
        Contour::Static,
    ];

    /// Configuration name of this contour
    pub fn name(self) -> &'static str {
        match self {
            Contour::Arch => "arch",
            Contour::Descending => "descending",
            Contour::Ascending => "ascending",
            Contour::Wave => "wave",
            Contour::Static => "static",
        }
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Generate `length` signed semitone steps following a contour
pub fn generate_contour<R: Rng + ?Sized>(contour: Contour, length: usize, rng: &mut R) -> Vec<i32> {
    match contour {
        Contour::Arch => {
            let mid = length / 2;
            let mut steps: Vec<i32> = (0..mid).map(|_| pick(rng, &ARCH_RISE_STEPS)).collect();
            steps.extend((mid..length).map(|_| pick(rng, &ARCH_FALL_STEPS)));
            steps
        }
        Contour::Descending => (0..length).map(|_| pick(rng, &DESCENDING_STEPS)).collect(),
        Contour::Ascending => (0..length).map(|_| pick(rng, &ASCENDING_STEPS)).collect(),
        Contour::Wave => {
            let mut direction = 1;
            (0..length)
                .map(|i| {
                    if i % WAVE_PERIOD == 0 {
                        direction = -direction;
                    }
                    direction * pick(rng, &WAVE_MAGNITUDES)
                })
                .collect()
        }
        Contour::Static => (0..length).map(|_| pick(rng, &STATIC_STEPS)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_arch_rises_then_falls() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let steps = generate_contour(Contour::Arch, 8, &mut rng);
            assert_eq!(steps.len(), 8);
            assert!(steps[..4].iter().sum::<i32>() > 0);
            assert!(steps[4..].iter().sum::<i32>() < 0);
        }
    }

    #[test]
    fn test_arch_odd_length_falls_longer() {
        let mut rng = StdRng::seed_from_u64(3);
        let steps = generate_contour(Contour::Arch, 5, &mut rng);
        assert!(steps[..2].iter().all(|&s| s > 0));
        assert!(steps[2..].iter().all(|&s| s < 0));
    }

    #[test]
    fn test_directional_contours() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let down = generate_contour(Contour::Descending, 6, &mut rng);
            assert!(down.iter().all(|&s| s <= 0));

            let up = generate_contour(Contour::Ascending, 6, &mut rng);
            assert!(up.iter().all(|&s| s >= 0));
        }
    }

    #[test]
    fn test_wave_flips_every_three_steps() {
        let mut rng = StdRng::seed_from_u64(5);
        let steps = generate_contour(Contour::Wave, 9, &mut rng);

        assert!(steps[0..3].iter().all(|&s| s < 0));
        assert!(steps[3..6].iter().all(|&s| s > 0));
        assert!(steps[6..9].iter().all(|&s| s < 0));
        assert!(steps.iter().all(|s| (1..=2).contains(&s.abs())));
    }

    #[test]
    fn test_static_minimal_movement() {
        let mut rng = StdRng::seed_from_u64(13);
        let steps = generate_contour(Contour::Static, 32, &mut rng);
        assert!(steps.iter().all(|s| s.abs() <= 1));
    }

    #[test]
    fn test_zero_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for contour in Contour::ALL {
            assert!(generate_contour(contour, 0, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_contour_names() {
        assert_eq!(Contour::Wave.to_string(), "wave");
        for contour in Contour::ALL {
            let yaml = serde_yaml::to_string(&contour).unwrap();
            assert_eq!(yaml.trim(), contour.name());
        }
    }
}
