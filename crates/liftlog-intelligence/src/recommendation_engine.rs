// ABOUTME: Next-set load recommendation engine built on the RPE-adjusted Brzycki estimate
// ABOUTME: Produces a lazy nine-row table of target RPE to external weight from the latest set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Recommendation Engine
//!
//! Given the most recent set a user logged for an exercise, estimate their one-rep max
//! and derive the external load to use for `target_reps` at each target RPE from 6.0 to
//! 10.0 in half-point steps.
//!
//! The engine is pure: collaborators (history, profile and exercise lookups) run before
//! it and hand over plain values. It never blocks and holds no shared state.
//!
//! ## Bodyweight handling
//!
//! The historical estimate uses the bodyweight recorded *with that set*. The new
//! recommendation subtracts the user's *current* bodyweight, and only when the exercise
//! is bodyweight-assisted and the historical set actually carried a bodyweight.
//!
//! ```rust
//! use liftlog_core::models::{ExerciseProfile, Profile, SetRecord};
//! use liftlog_intelligence::recommendation_engine::recommend;
//!
//! let history = SetRecord::new(5, 100.0, 8.0);
//! let rows: Vec<_> = recommend(
//!     Some(&history),
//!     &Profile::new(80.0),
//!     ExerciseProfile::EXTERNAL_LOAD,
//!     5,
//! )?
//! .collect();
//!
//! assert_eq!(rows.len(), 9);
//! assert_eq!(rows[4].target_rpe, 8.0);
//! assert_eq!(rows[4].recommended_weight, 100.0);
//! # Ok::<(), liftlog_intelligence::errors::RecommendationError>(())
//! ```

use std::iter::FusedIterator;

use liftlog_core::constants::{
    loading::SMALLEST_INCREMENT_KG,
    rpe::{TABLE_MIN_RPE, TABLE_ROWS, TABLE_STEP},
};
use liftlog_core::models::{ExerciseProfile, Profile, SetRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::brzycki;
use crate::errors::RecommendationError;

/// One row of the recommendation table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    /// Target RPE for the next set
    pub target_rpe: f64,
    /// Suggested external weight in kilograms, a multiple of 1.25; may be negative on
    /// bodyweight-assisted exercises (remove load from the belt / add assistance)
    pub recommended_weight: f64,
}

/// One-rep-max estimate derived from a historical set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneRepMaxEstimate {
    /// `reps + (10 - rpe)` of the historical set
    pub effective_reps: f64,
    /// External weight plus recorded bodyweight of the historical set
    pub total_load: f64,
    /// Estimated total one-rep max, bodyweight included
    pub one_rep_max: f64,
}

impl OneRepMaxEstimate {
    /// Estimate from a historical set
    ///
    /// # Errors
    ///
    /// Returns [`RecommendationError::DegenerateInput`] when the set's effective reps
    /// equal 37 or the estimate is not a finite number
    pub fn from_set(record: &SetRecord) -> Result<Self, RecommendationError> {
        let effective_reps = brzycki::effective_reps(f64::from(record.reps), record.rpe);
        let total_load = record.total_load();

        let one_rep_max = brzycki::estimate_one_rep_max(total_load, effective_reps).ok_or_else(
            || RecommendationError::DegenerateInput {
                record: record.clone(),
                effective_reps,
            },
        )?;

        Ok(Self {
            effective_reps,
            total_load,
            one_rep_max,
        })
    }
}

/// Target RPE of the row at `index` (0 => 6.0, 8 => 10.0)
#[must_use]
pub fn target_rpe_at(index: u8) -> f64 {
    TABLE_STEP.mul_add(f64::from(index), TABLE_MIN_RPE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TablePlan {
    estimate: OneRepMaxEstimate,
    bodyweight_component: f64,
    target_reps: f64,
}

/// Lazy, ordered recommendation table
///
/// Yields exactly nine rows in ascending target RPE when built from a history record,
/// and nothing when there was no history.
#[derive(Debug, Clone)]
pub struct RecommendationRows {
    plan: Option<TablePlan>,
    next_row: u8,
}

impl RecommendationRows {
    const fn empty() -> Self {
        Self {
            plan: None,
            next_row: 0,
        }
    }

    /// Whether the table was built from a history record
    #[must_use]
    pub const fn has_history(&self) -> bool {
        self.plan.is_some()
    }

    /// The one-rep-max estimate behind the table
    #[must_use]
    pub fn estimate(&self) -> Option<OneRepMaxEstimate> {
        self.plan.map(|plan| plan.estimate)
    }

    /// Bodyweight subtracted from every row's total load
    #[must_use]
    pub fn bodyweight_component(&self) -> f64 {
        self.plan.map_or(0.0, |plan| plan.bodyweight_component)
    }

    fn row_at(plan: &TablePlan, index: u8) -> RecommendationRow {
        let target_rpe = target_rpe_at(index);
        let effective_target_reps = brzycki::effective_reps(plan.target_reps, target_rpe);
        let total_at_target =
            brzycki::load_for_effective_reps(plan.estimate.one_rep_max, effective_target_reps);
        let external = total_at_target - plan.bodyweight_component;

        RecommendationRow {
            target_rpe,
            recommended_weight: brzycki::round_to_increment(external, SMALLEST_INCREMENT_KG),
        }
    }

    fn remaining(&self) -> usize {
        if self.plan.is_some() {
            TABLE_ROWS.saturating_sub(usize::from(self.next_row))
        } else {
            0
        }
    }
}

impl Iterator for RecommendationRows {
    type Item = RecommendationRow;

    fn next(&mut self) -> Option<Self::Item> {
        let plan = self.plan.as_ref()?;
        if usize::from(self.next_row) >= TABLE_ROWS {
            return None;
        }
        let row = Self::row_at(plan, self.next_row);
        self.next_row += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecommendationRows {}

impl FusedIterator for RecommendationRows {}

/// Build the recommendation table for the next set
///
/// Returns an empty table when `history` is `None`. Out-of-range RPE or negative weights
/// in `history` are used as given.
///
/// # Errors
///
/// - [`RecommendationError::InvalidTargetReps`] if `target_reps` is zero and history exists
/// - [`RecommendationError::DegenerateInput`] if the historical set's effective reps equal 37
pub fn recommend(
    history: Option<&SetRecord>,
    profile: &Profile,
    exercise: ExerciseProfile,
    target_reps: u32,
) -> Result<RecommendationRows, RecommendationError> {
    let Some(record) = history else {
        debug!("No history for exercise, returning empty recommendation table");
        return Ok(RecommendationRows::empty());
    };

    if target_reps == 0 {
        return Err(RecommendationError::InvalidTargetReps(target_reps));
    }

    let estimate = OneRepMaxEstimate::from_set(record)?;

    let bodyweight_component = if exercise.uses_bodyweight && record.recorded_bodyweight.is_some()
    {
        profile.current_bodyweight
    } else {
        0.0
    };

    debug!(
        one_rep_max = estimate.one_rep_max,
        effective_reps = estimate.effective_reps,
        bodyweight_component,
        target_reps,
        "Built recommendation plan"
    );

    Ok(RecommendationRows {
        plan: Some(TablePlan {
            estimate,
            bodyweight_component,
            target_reps: f64::from(target_reps),
        }),
        next_row: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_target_rpe_sequence() {
        let rpes: Vec<f64> = (0..9).map(target_rpe_at).collect();
        assert_eq!(rpes, vec![6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 9.5, 10.0]);
    }

    #[test]
    fn test_worked_example() {
        let history = SetRecord::new(5, 100.0, 8.0);
        let rows = recommend(
            Some(&history),
            &Profile::new(80.0),
            ExerciseProfile::EXTERNAL_LOAD,
            5,
        )
        .unwrap();

        let estimate = rows.estimate().unwrap();
        assert!(close(estimate.effective_reps, 7.0));
        assert!(close(estimate.one_rep_max, 120.0));

        let rows: Vec<_> = rows.collect();
        let at_eight = rows.iter().find(|row| close(row.target_rpe, 8.0)).unwrap();
        assert!(close(at_eight.recommended_weight, 100.0));

        // RPE 10 with 5 reps: 120 x 32 / 36 = 106.67 -> 106.25
        assert!(close(rows[8].recommended_weight, 106.25));
        // RPE 6 with 5 reps: 120 x 28 / 36 = 93.33 -> 93.75
        assert!(close(rows[0].recommended_weight, 93.75));
    }

    #[test]
    fn test_no_history_is_empty_even_with_zero_target_reps() {
        let rows = recommend(None, &Profile::default(), ExerciseProfile::EXTERNAL_LOAD, 0).unwrap();
        assert!(!rows.has_history());
        assert_eq!(rows.len(), 0);
        assert_eq!(rows.count(), 0);
    }

    #[test]
    fn test_zero_target_reps_rejected_with_history() {
        let history = SetRecord::new(5, 100.0, 8.0);
        let result = recommend(
            Some(&history),
            &Profile::default(),
            ExerciseProfile::EXTERNAL_LOAD,
            0,
        );
        assert_eq!(result.unwrap_err(), RecommendationError::InvalidTargetReps(0));
    }

    #[test]
    fn test_exact_size_tracks_consumption() {
        let history = SetRecord::new(3, 140.0, 9.0);
        let mut rows = recommend(
            Some(&history),
            &Profile::default(),
            ExerciseProfile::EXTERNAL_LOAD,
            3,
        )
        .unwrap();
        assert_eq!(rows.len(), 9);
        rows.next();
        rows.next();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows.by_ref().count(), 7);
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_current_bodyweight_replaces_recorded_bodyweight() {
        // Dips: 8 reps +20kg at RPE 8 weighing 80kg, now weighing 85kg
        let history = SetRecord::new(8, 20.0, 8.0).with_recorded_bodyweight(80.0);
        let rows = recommend(
            Some(&history),
            &Profile::new(85.0),
            ExerciseProfile::BODYWEIGHT_ASSISTED,
            8,
        )
        .unwrap();
        assert!(close(rows.bodyweight_component(), 85.0));

        let at_eight = rows.clone().nth(4).unwrap();
        // Same total load as before (100kg), 5kg of it now comes from bodyweight
        assert!(close(at_eight.recommended_weight, 15.0));
    }

    #[test]
    fn test_bodyweight_flag_without_recorded_bodyweight_subtracts_nothing() {
        let history = SetRecord::new(8, 20.0, 8.0);
        let rows = recommend(
            Some(&history),
            &Profile::new(85.0),
            ExerciseProfile::BODYWEIGHT_ASSISTED,
            8,
        )
        .unwrap();
        assert!(close(rows.bodyweight_component(), 0.0));
    }

    #[test]
    fn test_heavy_assistance_goes_negative() {
        // 5 assisted pull-ups (-30kg) at RPE 10, asking for 12 reps
        let history = SetRecord::new(5, -30.0, 10.0).with_recorded_bodyweight(90.0);
        let rows: Vec<_> = recommend(
            Some(&history),
            &Profile::new(90.0),
            ExerciseProfile::BODYWEIGHT_ASSISTED,
            12,
        )
        .unwrap()
        .collect();
        assert!(rows.iter().all(|row| row.recommended_weight < 0.0));
    }

    #[test]
    fn test_degenerate_history() {
        let history = SetRecord::new(32, 40.0, 5.0);
        let err = recommend(
            Some(&history),
            &Profile::default(),
            ExerciseProfile::EXTERNAL_LOAD,
            5,
        )
        .unwrap_err();
        match err {
            RecommendationError::DegenerateInput {
                record,
                effective_reps,
            } => {
                assert_eq!(record, history);
                assert!(close(effective_reps, 37.0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
