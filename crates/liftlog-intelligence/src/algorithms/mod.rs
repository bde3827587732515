// ABOUTME: Strength estimation formulas used by the recommendation engine
// ABOUTME: Currently the RPE-adjusted Brzycki one-rep-max model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

/// Brzycki one-rep-max estimate and its inverse, with RPE-based effective reps
pub mod brzycki;
