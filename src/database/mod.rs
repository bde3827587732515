// ABOUTME: SQLite storage for users, the exercise catalogue, logged sets and bodyweights
// ABOUTME: Owns the connection pool, idempotent schema migration and timestamp encoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Database Management
//!
//! A single [`Database`] is opened at startup and shared through `ServerResources`.
//! Most reads exist twice: a `Database` method that runs against the pool, and an
//! associated `fetch_*` function generic over any SQLite executor so a handler can run
//! several lookups on one explicitly acquired connection or inside a transaction.

mod bodyweight;
mod exercises;
mod users;
mod workouts;

use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::limits::DATABASE_BUSY_TIMEOUT_SECS;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Database manager for all persisted state
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// `sqlite::memory:` gets a single never-recycled connection, since every new
    /// connection to an in-memory database would see an empty schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await?
        } else {
            // Create the database file if it doesn't exist and wait on a locked file
            // rather than failing the write at once
            let options = SqliteConnectOptions::from_str(database_url)?
                .create_if_missing(true)
                .busy_timeout(Duration::from_secs(DATABASE_BUSY_TIMEOUT_SECS));
            SqlitePoolOptions::new().connect_with(options).await?
        };

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready");

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check out one pooled connection; it returns to the pool when dropped
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is closed or times out
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot answer a trivial query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        let started = Instant::now();

        self.migrate_users().await?;
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        self.migrate_bodyweights().await?;

        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_database_operation("migrate", "*", true, elapsed);
        debug!(elapsed_ms = elapsed, "Schema migration complete");
        Ok(())
    }
}

/// Encode a timestamp as fixed-width RFC 3339 UTC, so lexical order is chronological
pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a timestamp written by [`format_timestamp`]
pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}'")).with_source(e))
}

/// Decode a user id stored as TEXT
pub(crate) fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid stored user id '{raw}'")).with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamps_are_fixed_width_and_ordered() {
        let early = Utc.with_ymd_and_hms(2025, 1, 9, 8, 0, 0).unwrap();
        let late = early + chrono::Duration::microseconds(1);

        let (a, b) = (format_timestamp(early), format_timestamp(late));
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(a, "2025-01-09T08:00:00.000000Z");
        assert_eq!(parse_timestamp(&b).unwrap(), late);
    }

    #[test]
    fn test_corrupt_values_are_database_errors() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_uuid("not-a-uuid").is_err());
    }

    #[tokio::test]
    async fn test_memory_database_keeps_schema_across_calls() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.ping().await.unwrap();
        // Running migrations twice is a no-op
        db.migrate().await.unwrap();
        assert_eq!(db.get_user_count().await.unwrap(), 0);
    }
}
