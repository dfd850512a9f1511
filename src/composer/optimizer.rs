// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bounded stochastic refinement of a draft melody.
//!
//! Each iteration nudges a random subset of pitches by a step or two,
//! snaps them back to the scale and rescores. Improvements are always
//! accepted; other candidates are accepted with a small fixed probability
//! so the search can leave local optima. The returned melody is the last
//! accepted state, which is not necessarily the best one observed.

use rand::seq::index;
use rand::Rng;
use tracing::{info, trace};

use crate::config::ComposerTuning;
use crate::music::{Note, Scale};

use super::melody::Melody;
use super::pick;
use super::uniqueness::uniqueness;

/// Pitch nudges applied to mutated notes
pub const MUTATION_STEPS: [i32; 4] = [-2, -1, 1, 2];

/// Largest fraction of notes mutated in one iteration is `1 / MUTATION_DIVISOR`
pub const MUTATION_DIVISOR: usize = 4;

/// Outcome of one optimizer iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The candidate scored strictly higher
    Improved,
    /// The candidate did not improve but was accepted anyway
    AcceptedWorse,
    /// The candidate was discarded
    Rejected,
}

impl Decision {
    /// Whether the candidate replaces the current state
    pub fn is_accepted(self) -> bool {
        !matches!(self, Decision::Rejected)
    }
}

/// Result of a single iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub candidate: Vec<Note>,
    pub score: f64,
    pub decision: Decision,
}

/// Counters over one optimization run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizationReport {
    /// Score of the draft
    pub initial_score: f64,
    /// Score of the returned (last accepted) state
    pub final_score: f64,
    /// Highest score of any accepted state, including the draft
    pub best_seen_score: f64,
    pub improved: usize,
    pub accepted_worse: usize,
    pub rejected: usize,
}

impl OptimizationReport {
    fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Improved => self.improved += 1,
            Decision::AcceptedWorse => self.accepted_worse += 1,
            Decision::Rejected => self.rejected += 1,
        }
    }

    /// Total iterations run
    pub fn iterations(&self) -> usize {
        self.improved + self.accepted_worse + self.rejected
    }
}

/// Uniqueness optimizer
#[derive(Debug, Clone)]
pub struct Optimizer {
    iterations: usize,
    worse_acceptance_probability: f64,
}

impl Optimizer {
    /// Create an optimizer with an explicit budget and acceptance probability
    pub fn new(iterations: usize, worse_acceptance_probability: f64) -> Self {
        Self {
            iterations,
            worse_acceptance_probability,
        }
    }

    /// Create an optimizer from engine tuning
    pub fn from_tuning(tuning: &ComposerTuning) -> Self {
        Self::new(tuning.optimizer_iterations, tuning.worse_acceptance_probability)
    }

    /// Iteration budget
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Refine a melody, returning the last accepted state
    pub fn optimize<R: Rng + ?Sized>(&self, melody: Melody, rng: &mut R) -> Melody {
        self.optimize_with_report(melody, rng).0
    }

    /// Refine a melody and report how each iteration was decided
    pub fn optimize_with_report<R: Rng + ?Sized>(
        &self,
        melody: Melody,
        rng: &mut R,
    ) -> (Melody, OptimizationReport) {
        let scale = melody.scale();
        let initial_score = uniqueness(melody.notes());
        let mut report = OptimizationReport {
            initial_score,
            best_seen_score: initial_score,
            ..Default::default()
        };

        let mut current_notes = melody.notes().to_vec();
        let mut current_score = initial_score;

        for iteration in 0..self.iterations {
            let step = self.step(&current_notes, current_score, &scale, rng);
            trace!(iteration, score = step.score, decision = ?step.decision, "optimizer step");
            report.record(step.decision);

            if step.decision.is_accepted() {
                current_notes = step.candidate;
                current_score = step.score;
                report.best_seen_score = report.best_seen_score.max(current_score);
            }
        }

        report.final_score = current_score;
        info!(
            initial = report.initial_score,
            final_score = report.final_score,
            improved = report.improved,
            accepted_worse = report.accepted_worse,
            "optimization finished"
        );
        (melody.with_notes(current_notes), report)
    }

    /// Run one mutate-score-decide iteration against the current state
    pub fn step<R: Rng + ?Sized>(
        &self,
        current: &[Note],
        current_score: f64,
        scale: &Scale,
        rng: &mut R,
    ) -> Step {
        let candidate = mutate(current, scale, rng);
        let score = uniqueness(&candidate);

        let decision = if score > current_score {
            Decision::Improved
        } else if rng.gen::<f64>() < self.worse_acceptance_probability {
            Decision::AcceptedWorse
        } else {
            Decision::Rejected
        };

        Step {
            candidate,
            score,
            decision,
        }
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::from_tuning(&ComposerTuning::default())
    }
}

/// Copy `notes` with between one and a quarter of the pitches nudged and snapped
pub fn mutate<R: Rng + ?Sized>(notes: &[Note], scale: &Scale, rng: &mut R) -> Vec<Note> {
    let mut candidate = notes.to_vec();
    let len = candidate.len();

    let changes = rng.gen_range(1..=(len / MUTATION_DIVISOR).max(1));
    let amount = changes.min(len);
    if amount == 0 {
        return candidate;
    }

    for idx in index::sample(rng, len, amount).into_iter() {
        let note = candidate[idx];
        let nudged = note.pitch_i32() + pick(rng, &MUTATION_STEPS);
        candidate[idx] = note.with_pitch(scale.snap(nudged));
    }
    candidate
}
