// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sliding-window uniqueness scoring.

use std::collections::HashSet;

use crate::music::Note;

/// Notes per pattern window
pub const PATTERN_WINDOW: usize = 4;

/// Interval shape of one window: the deltas between its consecutive pitches
pub type PatternKey = [i32; PATTERN_WINDOW - 1];

/// Interval shape of every window of `PATTERN_WINDOW` consecutive notes
pub fn pattern_keys(notes: &[Note]) -> Vec<PatternKey> {
    notes
        .windows(PATTERN_WINDOW)
        .map(|window| {
            let mut key = [0; PATTERN_WINDOW - 1];
            for (slot, pair) in key.iter_mut().zip(window.windows(2)) {
                *slot = pair[1].pitch_i32() - pair[0].pitch_i32();
            }
            key
        })
        .collect()
}

/// Fraction of distinct window shapes over all windows, in [0, 1].
///
/// Melodies too short to contain a window score 1.0.
pub fn uniqueness(notes: &[Note]) -> f64 {
    let keys = pattern_keys(notes);
    if keys.is_empty() {
        return 1.0;
    }
    let distinct: HashSet<&PatternKey> = keys.iter().collect();
    distinct.len() as f64 / keys.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melody(pitches: &[i32]) -> Vec<Note> {
        pitches
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, i as f64, 1.0, 80))
            .collect()
    }

    #[test]
    fn test_short_melodies_are_unique() {
        assert_eq!(uniqueness(&[]), 1.0);
        assert_eq!(uniqueness(&melody(&[60, 62, 64])), 1.0);
    }

    #[test]
    fn test_pattern_keys() {
        let keys = pattern_keys(&melody(&[60, 62, 64, 65, 60]));
        assert_eq!(keys, vec![[2, 2, 1], [2, 1, -5]]);
    }

    #[test]
    fn test_repetitive_pattern_scores_low() {
        let notes: Vec<i32> = (0..8).map(|i| 60 + (i % 4) * 2).collect();
        let score = uniqueness(&melody(&notes));
        assert!(score < 1.0);
        // windows: [2,2,2] [2,2,-6] [2,-6,2] [-6,2,2] [2,2,2]
        assert!((score - 4.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_repeated_shape_approaches_zero() {
        let notes = melody(&vec![60; 100]);
        let score = uniqueness(&notes);
        assert!(score > 0.0 && score < 0.02);
    }

    #[test]
    fn test_transposition_does_not_create_new_patterns() {
        let a = uniqueness(&melody(&[60, 62, 64, 60, 62, 64]));
        let b = uniqueness(&melody(&[70, 72, 74, 70, 72, 74]));
        assert_eq!(a, b);
    }
}
