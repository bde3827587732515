// ABOUTME: Error types raised by the recommendation engine
// ABOUTME: DegenerateInput names the offending set; converts into AppError for HTTP responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::errors::AppError;
use liftlog_core::models::SetRecord;
use serde_json::json;
use thiserror::Error;

/// Recommendation engine failures
///
/// A missing history record is not an error; the engine returns an empty table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendationError {
    /// The historical set puts the Brzycki denominator at zero (or yields a non-finite
    /// estimate), so no one-rep max can be derived from it
    #[error(
        "Cannot estimate a one-rep max from {} reps at RPE {} ({effective_reps} effective reps)",
        .record.reps,
        .record.rpe
    )]
    DegenerateInput {
        /// The set the estimate was attempted from
        record: SetRecord,
        /// `reps + (10 - rpe)` for that set
        effective_reps: f64,
    },

    /// Target rep count below one
    #[error("Target reps must be at least 1, got {0}")]
    InvalidTargetReps(u32),
}

impl From<RecommendationError> for AppError {
    fn from(error: RecommendationError) -> Self {
        match &error {
            RecommendationError::DegenerateInput {
                record,
                effective_reps,
            } => Self::out_of_range(error.to_string()).with_details(json!({
                "reps": record.reps,
                "weight": record.weight,
                "rpe": record.rpe,
                "recorded_bodyweight": record.recorded_bodyweight,
                "performed_at": record.performed_at.to_rfc3339(),
                "effective_reps": effective_reps,
            })),
            RecommendationError::InvalidTargetReps(_) => Self::invalid_input(error.to_string()),
        }
    }
}
