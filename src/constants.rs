// ABOUTME: Application constants plus environment-backed configuration lookups
// ABOUTME: Re-exports liftlog-core constants and adds the server's env variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Constants Module
//!
//! Domain constants come from `liftlog-core`; this module adds the names of the
//! environment variables the server reads.

pub use liftlog_core::constants::*;

/// Environment variable names
pub mod env_vars {
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Bind port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// `SQLite` database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// HS256 session signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Session lifetime in minutes
    pub const SESSION_EXPIRY_MINUTES: &str = "SESSION_EXPIRY_MINUTES";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Whether to seed the exercise catalogue on startup
    pub const SEED_EXERCISES: &str = "SEED_EXERCISES";
    /// Log level
    pub const RUST_LOG: &str = "RUST_LOG";
}
