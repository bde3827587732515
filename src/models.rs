// ABOUTME: Domain models re-exported from liftlog-core
// ABOUTME: Users, exercises, logged sets, bodyweight entries and the engine's input records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Data Models
//!
//! - `User`: registered account with an Argon2 password hash
//! - `Exercise` / `ExerciseProfile`: catalogue entry and the engine's view of it
//! - `WorkoutRecord` / `NewWorkout`: stored set and the request to log one
//! - `SetRecord`: historical set as consumed by the recommendation engine
//! - `BodyweightEntry` / `NewBodyweight` / `Profile`: bodyweight log and latest value

pub use liftlog_core::models::*;
