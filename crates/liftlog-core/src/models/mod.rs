// ABOUTME: Core data models for users, exercises and logged workouts
// ABOUTME: Re-exports the persisted records and the recommendation engine's input types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Domain models shared by storage, HTTP handlers and the recommendation engine.

/// Exercise catalogue entries and their bodyweight flag
pub mod exercise;
/// Users, profiles and bodyweight log entries
pub mod user;
/// Logged sets and the engine's historical set record
pub mod workout;

pub use exercise::{Exercise, ExerciseProfile};
pub use user::{BodyweightEntry, NewBodyweight, Profile, User};
pub use workout::{NewWorkout, SetRecord, WorkoutRecord};
