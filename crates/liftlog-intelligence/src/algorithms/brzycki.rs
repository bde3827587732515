// ABOUTME: Brzycki one-rep-max estimation adapted for RPE-based effective rep counting
// ABOUTME: Forward estimate, inverse load-for-reps, and rounding to the smallest plate increment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Brzycki formula with reps in reserve
//!
//! Formula: `1RM = load x 36 / (37 - effective_reps)`, inverse
//! `load = 1RM x (37 - effective_reps) / 36`.
//!
//! RPE stands in for reps in reserve: RPE 10 means none left, every point below 10
//! adds one implied repetition, so `effective_reps = reps + (10 - rpe)`.
//!
//! # Scientific References
//!
//! - Brzycki, M. (1993). "Strength testing: Predicting a one-rep max from reps-to-fatigue."
//!   *Journal of Physical Education, Recreation & Dance*, 64(1), 88-90.
//! - Zourdos, M.C., et al. (2016). "Novel resistance training-specific rating of perceived
//!   exertion scale measuring repetitions in reserve." *JSCR*, 30(1), 267-275.

use liftlog_core::constants::{
    brzycki::{CEILING_TOLERANCE, COEFFICIENT, REP_CEILING},
    rpe::MAX_RPE,
};

/// Repetitions performed plus the reps in reserve implied by the RPE
#[must_use]
pub fn effective_reps(reps: f64, rpe: f64) -> f64 {
    reps + (MAX_RPE - rpe)
}

/// Whether `effective_reps` sits on the formula's pole (37 reps)
#[must_use]
pub fn is_on_rep_ceiling(effective_reps: f64) -> bool {
    (REP_CEILING - effective_reps).abs() <= CEILING_TOLERANCE
}

/// Estimate a one-rep max from a total load lifted for `effective_reps`
///
/// Returns `None` when the denominator vanishes or the result is not finite. Effective
/// rep counts above 37 are not rejected and yield a negative estimate.
#[must_use]
pub fn estimate_one_rep_max(total_load: f64, effective_reps: f64) -> Option<f64> {
    if is_on_rep_ceiling(effective_reps) {
        return None;
    }
    let one_rep_max = total_load * COEFFICIENT / (REP_CEILING - effective_reps);
    one_rep_max.is_finite().then_some(one_rep_max)
}

/// Total load liftable for `effective_reps` given a one-rep max
#[must_use]
pub fn load_for_effective_reps(one_rep_max: f64, effective_reps: f64) -> f64 {
    one_rep_max * (REP_CEILING - effective_reps) / COEFFICIENT
}

/// Round to the nearest multiple of `increment`, halves away from zero
#[must_use]
pub fn round_to_increment(weight: f64, increment: f64) -> f64 {
    (weight / increment).round() * increment
}
