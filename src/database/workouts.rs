// ABOUTME: Workout set database operations
// ABOUTME: Single-statement set logging with bodyweight capture, history listing and latest-set lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};
use tracing::debug;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid, Database};
use crate::constants::limits::MAX_WORKOUT_LIST_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::models::{NewWorkout, SetRecord, WorkoutRecord};

const WORKOUT_COLUMNS: &str = "id, user_id, exercise_name, reps, weight, rpe, bodyweight, created_at";

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                exercise_name TEXT NOT NULL REFERENCES exercises(name),
                reps INTEGER NOT NULL CHECK (reps > 0),
                weight REAL NOT NULL,
                rpe REAL NOT NULL CHECK (rpe >= 0 AND rpe <= 10),
                bodyweight REAL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_exercise_created ON workouts(user_id, exercise_name, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Validate and store a set
    ///
    /// The insert is a single statement that reads the user's current bodyweight in a
    /// subquery, so it takes the write lock up front and waits out concurrent writers
    /// instead of failing on a lock upgrade. A bodyweight is stored with the set only
    /// when the exercise is bodyweight-assisted and the user has logged one.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown exercise, `InvalidInput` when the set
    /// fails validation, or a database error
    pub async fn create_workout(
        &self,
        user_id: Uuid,
        workout: &NewWorkout,
    ) -> AppResult<WorkoutRecord> {
        let exercise = Self::fetch_exercise(&self.pool, &workout.exercise_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Exercise '{}'", workout.exercise_name)))?;
        workout.validate(&exercise)?;

        let created_at = Utc::now();
        let row = sqlx::query(
            r"
            INSERT INTO workouts (user_id, exercise_name, reps, weight, rpe, bodyweight, created_at)
            SELECT $1, $2, $3, $4, $5,
                CASE WHEN $6 THEN (
                    SELECT weight FROM bodyweights
                    WHERE user_id = $1
                    ORDER BY recorded_at DESC, id DESC
                    LIMIT 1
                ) END,
                $7
            RETURNING id, bodyweight
            ",
        )
        .bind(user_id.to_string())
        .bind(&exercise.name)
        .bind(i64::from(workout.reps))
        .bind(workout.weight)
        .bind(workout.rpe)
        .bind(exercise.uses_bodyweight)
        .bind(format_timestamp(created_at))
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        let bodyweight: Option<f64> = row.try_get("bodyweight")?;
        debug!(workout_id = id, %user_id, exercise = %exercise.name, "Stored workout");

        Ok(WorkoutRecord {
            id,
            user_id,
            exercise_name: exercise.name,
            reps: workout.reps,
            weight: workout.weight,
            rpe: workout.rpe,
            bodyweight,
            created_at,
        })
    }

    /// The user's sets, newest first, optionally for one exercise
    ///
    /// `limit` is capped at the maximum list size.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt
    pub async fn list_workouts(
        &self,
        user_id: Uuid,
        exercise_name: Option<&str>,
        limit: u32,
    ) -> AppResult<Vec<WorkoutRecord>> {
        let query = format!(
            r"
            SELECT {WORKOUT_COLUMNS} FROM workouts
            WHERE user_id = $1 AND ($2 IS NULL OR exercise_name = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(exercise_name)
            .bind(i64::from(limit.min(MAX_WORKOUT_LIST_LIMIT)))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_workout).collect()
    }

    /// The most recent set for (user, exercise) as the recommendation engine sees it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn latest_set_record(
        &self,
        user_id: Uuid,
        exercise_name: &str,
    ) -> AppResult<Option<SetRecord>> {
        let latest = Self::fetch_latest_workout(&self.pool, user_id, exercise_name).await?;
        Ok(latest.as_ref().map(WorkoutRecord::to_set_record))
    }

    /// Most recent stored set on any executor (pool, connection or transaction)
    ///
    /// Ties on `created_at` resolve to the later insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn fetch_latest_workout<'e, E>(
        executor: E,
        user_id: Uuid,
        exercise_name: &str,
    ) -> AppResult<Option<WorkoutRecord>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            r"
            SELECT {WORKOUT_COLUMNS} FROM workouts
            WHERE user_id = $1 AND exercise_name = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "
        );

        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(exercise_name)
            .fetch_optional(executor)
            .await?;

        row.as_ref().map(row_to_workout).transpose()
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<WorkoutRecord> {
    let user_id: String = row.try_get("user_id")?;
    let created_at: String = row.try_get("created_at")?;
    let reps: i64 = row.try_get("reps")?;

    Ok(WorkoutRecord {
        id: row.try_get("id")?,
        user_id: parse_uuid(&user_id)?,
        exercise_name: row.try_get("exercise_name")?,
        reps: u32::try_from(reps)
            .map_err(|e| AppError::database(format!("Invalid stored reps {reps}")).with_source(e))?,
        weight: row.try_get("weight")?,
        rpe: row.try_get("rpe")?,
        bodyweight: row.try_get("bodyweight")?,
        created_at: parse_timestamp(&created_at)?,
    })
}
