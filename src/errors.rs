// ABOUTME: Application error types re-exported from liftlog-core
// ABOUTME: AppError, ErrorCode and the JSON error body used by every HTTP handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Unified Error Handling System
//!
//! The error types live in `liftlog-core` so the recommendation engine can convert
//! into them without depending on the server. With the `http-response` feature
//! enabled, `AppError` implements axum's `IntoResponse`.

pub use liftlog_core::errors::*;
