// ABOUTME: Core types and constants for the Liftlog workout logging platform
// ABOUTME: Foundation crate with error handling, domain models, and training constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![deny(unsafe_code)]

//! # Liftlog Core
//!
//! Foundation crate shared by the recommendation engine and the HTTP server. It is
//! meant to change rarely so the rest of the workspace compiles incrementally.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the JSON error body
//! - **constants**: RPE table range, Brzycki coefficients, limits and defaults
//! - **models**: users, exercises, logged workouts and the engine's input records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (User, Exercise, WorkoutRecord, SetRecord, Profile)
pub mod models;
