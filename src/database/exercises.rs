// ABOUTME: Exercise catalogue database operations
// ABOUTME: Idempotent seeding, listing and lookup of exercises and their bodyweight flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};
use tracing::info;

use super::Database;
use crate::constants::seed;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::Exercise;

impl Database {
    pub(super) async fn migrate_exercises(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                name TEXT PRIMARY KEY,
                uses_bodyweight BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert the built-in catalogue, leaving existing entries untouched
    ///
    /// Returns how many exercises were newly inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails
    pub async fn seed_exercises(&self) -> AppResult<u64> {
        let mut inserted = 0;
        for &(name, uses_bodyweight) in seed::EXERCISES {
            inserted += sqlx::query(
                "INSERT OR IGNORE INTO exercises (name, uses_bodyweight) VALUES ($1, $2)",
            )
            .bind(name)
            .bind(uses_bodyweight)
            .execute(&self.pool)
            .await?
            .rows_affected();
        }

        if inserted > 0 {
            info!(inserted, "Seeded exercise catalogue");
        }
        Ok(inserted)
    }

    /// All exercises ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT name, uses_bodyweight FROM exercises ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Look up an exercise by its exact name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercise(&self, name: &str) -> AppResult<Option<Exercise>> {
        Self::fetch_exercise(&self.pool, name).await
    }

    /// Add an exercise to the catalogue
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name, `ResourceAlreadyExists` for a duplicate
    pub async fn create_exercise(&self, exercise: &Exercise) -> AppResult<()> {
        if exercise.name.trim().is_empty() {
            return Err(AppError::invalid_input("Exercise name must not be empty"));
        }

        sqlx::query("INSERT INTO exercises (name, uses_bodyweight) VALUES ($1, $2)")
            .bind(&exercise.name)
            .bind(exercise.uses_bodyweight)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let error = AppError::from(e);
                if error.code == ErrorCode::ResourceAlreadyExists {
                    AppError::already_exists(format!("Exercise '{}'", exercise.name))
                } else {
                    error
                }
            })?;

        Ok(())
    }

    /// Exercise lookup on any executor (pool, connection or transaction)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn fetch_exercise<'e, E>(executor: E, name: &str) -> AppResult<Option<Exercise>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query("SELECT name, uses_bodyweight FROM exercises WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await?;

        row.as_ref().map(row_to_exercise).transpose()
    }
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    Ok(Exercise {
        name: row.try_get("name")?,
        uses_bodyweight: row.try_get("uses_bodyweight")?,
    })
}
