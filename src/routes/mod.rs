// ABOUTME: Route module organization for the Liftlog HTTP API
// ABOUTME: Groups route definitions by domain; handlers stay thin and delegate to services and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Route module for the Liftlog server
//!
//! Each domain module exposes a `*Routes` struct whose `routes` function returns a
//! stateless `Router` ready to be merged by the server.

/// Registration, login, logout and current user
pub mod auth;
/// Bodyweight log
pub mod bodyweight;
/// Exercise catalogue
pub mod exercises;
/// Liveness and readiness
pub mod health;
/// Next-set load recommendations
pub mod recommendations;
/// Logged sets
pub mod workouts;

pub use auth::{AuthRoutes, AuthService};
pub use bodyweight::BodyweightRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use recommendations::RecommendationRoutes;
pub use workouts::WorkoutRoutes;
