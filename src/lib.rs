// ABOUTME: Main library entry point for the Liftlog workout logging API
// ABOUTME: Wires configuration, storage, sessions and HTTP routes around the recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![deny(unsafe_code)]

//! # Liftlog
//!
//! A multi-user workout log. Users record sets (exercise, reps, weight, RPE) and ask
//! for a table of suggested weights for their next set, derived from their most recent
//! set on that exercise by an RPE-adjusted Brzycki one-rep-max estimate.
//!
//! ## Architecture
//!
//! - **`liftlog-core`**: errors, constants and domain models
//! - **`liftlog-intelligence`**: the pure recommendation engine
//! - **this crate**: configuration, logging, session auth, `SQLite` storage and the
//!   axum HTTP API
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog::config::environment::ServerConfig;
//! use liftlog::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Liftlog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session secrets, token issuing/validation and password hashing
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage for users, exercises, sets and bodyweights
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Request tracing and session authentication middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Cookie handling
pub mod security;

/// HTTP server assembly
pub mod server;

/// Business logic shared by handlers
pub mod services;

pub use liftlog_intelligence as intelligence;
