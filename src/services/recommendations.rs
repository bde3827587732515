// ABOUTME: Recommendation business logic extracted from the route handler
// ABOUTME: Loads exercise, latest set and bodyweight on one connection, then runs the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_intelligence::{recommend, RecommendationRow};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::constants::limits::DEFAULT_TARGET_REPS;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, Profile, WorkoutRecord};

/// Everything the engine needs, read before it runs
#[derive(Debug, Clone)]
pub struct RecommendationInputs {
    /// Exercise metadata
    pub exercise: Exercise,
    /// Most recent set for (user, exercise)
    pub latest: Option<WorkoutRecord>,
    /// The user's current bodyweight
    pub profile: Profile,
}

/// Recommendation table as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTable {
    /// Exercise the table is for
    pub exercise_name: String,
    /// Rep count every row targets
    pub target_reps: u32,
    /// Whether the exercise is bodyweight-assisted
    pub uses_bodyweight: bool,
    /// Bodyweight used for the new recommendation
    pub current_bodyweight: f64,
    /// The set the estimate was derived from
    pub based_on: Option<WorkoutRecord>,
    /// Estimated one-rep max of the total load
    pub estimated_one_rep_max: Option<f64>,
    /// One row per target RPE, ascending
    pub rows: Vec<RecommendationRow>,
}

/// Read the engine's inputs for (user, exercise)
///
/// All three lookups share one pooled connection, returned to the pool when this
/// function exits on any path.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown exercise, or a database error
pub async fn load_inputs(
    database: &Database,
    user_id: Uuid,
    exercise_name: &str,
) -> AppResult<RecommendationInputs> {
    let mut conn = database.acquire().await?;

    let exercise = Database::fetch_exercise(&mut *conn, exercise_name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Exercise '{exercise_name}'")))?;
    let latest = Database::fetch_latest_workout(&mut *conn, user_id, exercise_name).await?;
    let current_bodyweight = Database::fetch_current_bodyweight(&mut *conn, user_id).await?;

    Ok(RecommendationInputs {
        exercise,
        latest,
        profile: Profile::from_latest(current_bodyweight),
    })
}

/// Run the engine over loaded inputs
///
/// `target_reps` defaults to the reps of the latest set, or to the default target when
/// there is no history.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero target and `ValueOutOfRange` when the latest set
/// cannot yield a one-rep-max estimate
pub fn build_table(
    inputs: RecommendationInputs,
    target_reps: Option<u32>,
) -> AppResult<RecommendationTable> {
    let history = inputs.latest.as_ref().map(WorkoutRecord::to_set_record);
    let target_reps = target_reps
        .or_else(|| history.as_ref().map(|set| set.reps))
        .unwrap_or(DEFAULT_TARGET_REPS);
    if target_reps == 0 {
        return Err(AppError::invalid_input("target_reps must be at least 1"));
    }

    let rows = recommend(
        history.as_ref(),
        &inputs.profile,
        inputs.exercise.profile(),
        target_reps,
    )?;
    let estimated_one_rep_max = rows.estimate().map(|estimate| estimate.one_rep_max);
    debug!(
        exercise = %inputs.exercise.name,
        target_reps,
        has_history = rows.has_history(),
        "Built recommendation table"
    );

    Ok(RecommendationTable {
        exercise_name: inputs.exercise.name,
        target_reps,
        uses_bodyweight: inputs.exercise.uses_bodyweight,
        current_bodyweight: inputs.profile.current_bodyweight,
        based_on: inputs.latest,
        estimated_one_rep_max,
        rows: rows.collect(),
    })
}
