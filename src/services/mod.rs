// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Keeps lookups and engine orchestration reusable by the HTTP API and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Domain service layer
//!
//! Protocol-agnostic business logic extracted from route handlers.

/// Recommendation lookups and table assembly
pub mod recommendations;
