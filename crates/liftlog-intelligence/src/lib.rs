// ABOUTME: Strength estimation and next-set load recommendations for Liftlog
// ABOUTME: Pure algorithms over plain values; storage and HTTP live in the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![deny(unsafe_code)]

//! # Liftlog Intelligence
//!
//! Turns the latest logged set of an exercise into a table of recommended external
//! loads for a requested rep count, one row per target RPE.
//!
//! - **algorithms**: the Brzycki formula adapted for reps in reserve
//! - **recommendation_engine**: builds the lazy recommendation table
//! - **errors**: engine failures and their mapping onto `AppError`

/// Strength estimation formulas
pub mod algorithms;

/// Recommendation engine failures
pub mod errors;

/// Next-set load recommendation table
pub mod recommendation_engine;

pub use errors::RecommendationError;
pub use recommendation_engine::{
    recommend, OneRepMaxEstimate, RecommendationRow, RecommendationRows,
};
