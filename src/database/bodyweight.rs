// ABOUTME: Bodyweight log database operations
// ABOUTME: Records measurements and answers "current bodyweight" as the newest entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{BodyweightEntry, NewBodyweight};

impl Database {
    pub(super) async fn migrate_bodyweights(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bodyweights (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                weight REAL NOT NULL,
                recorded_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bodyweights_user_recorded ON bodyweights(user_id, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Log a bodyweight measurement taken now
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive weight, or a database error
    pub async fn record_bodyweight(
        &self,
        user_id: Uuid,
        entry: &NewBodyweight,
    ) -> AppResult<BodyweightEntry> {
        entry.validate()?;
        let recorded_at = Utc::now();

        let id = sqlx::query(
            "INSERT INTO bodyweights (user_id, weight, recorded_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id.to_string())
        .bind(entry.weight)
        .bind(format_timestamp(recorded_at))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(BodyweightEntry {
            id,
            user_id,
            weight: entry.weight,
            recorded_at,
        })
    }

    /// The user's latest bodyweight, if any was logged
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn current_bodyweight(&self, user_id: Uuid) -> AppResult<Option<f64>> {
        Self::fetch_current_bodyweight(&self.pool, user_id).await
    }

    /// Bodyweight history, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt
    pub async fn list_bodyweights(&self, user_id: Uuid) -> AppResult<Vec<BodyweightEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, weight, recorded_at FROM bodyweights
            WHERE user_id = $1
            ORDER BY recorded_at DESC, id DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Latest bodyweight on any executor (pool, connection or transaction)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn fetch_current_bodyweight<'e, E>(
        executor: E,
        user_id: Uuid,
    ) -> AppResult<Option<f64>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let weight = sqlx::query_scalar(
            r"
            SELECT weight FROM bodyweights
            WHERE user_id = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(weight)
    }
}

fn row_to_entry(row: &SqliteRow) -> AppResult<BodyweightEntry> {
    let user_id: String = row.try_get("user_id")?;
    let recorded_at: String = row.try_get("recorded_at")?;

    Ok(BodyweightEntry {
        id: row.try_get("id")?,
        user_id: parse_uuid(&user_id)?,
        weight: row.try_get("weight")?,
        recorded_at: parse_timestamp(&recorded_at)?,
    })
}
