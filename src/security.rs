// ABOUTME: HTTP security helpers shared by the auth routes and middleware
// ABOUTME: Session cookie parsing and Set-Cookie construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Security Utilities

/// Session cookie helpers
pub mod cookies;
