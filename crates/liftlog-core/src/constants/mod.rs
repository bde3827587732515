// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Training math constants, limits, defaults and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat namespace.

/// RPE scale and the recommendation table's target range
pub mod rpe {
    /// RPE at which no repetitions remain in reserve
    pub const MAX_RPE: f64 = 10.0;
    /// Lowest RPE accepted when logging a set
    pub const MIN_RPE: f64 = 0.0;
    /// First target RPE of the recommendation table
    pub const TABLE_MIN_RPE: f64 = 6.0;
    /// Last target RPE of the recommendation table
    pub const TABLE_MAX_RPE: f64 = 10.0;
    /// Distance between consecutive target RPE rows
    pub const TABLE_STEP: f64 = 0.5;
    /// Number of rows in a recommendation table
    pub const TABLE_ROWS: usize = 9;
}

/// Brzycki one-rep-max formula: `1RM = load * 36 / (37 - reps)`
pub mod brzycki {
    /// Numerator coefficient
    pub const COEFFICIENT: f64 = 36.0;
    /// Rep count at which the denominator vanishes
    pub const REP_CEILING: f64 = 37.0;
    /// Tolerance used when deciding an effective rep count sits on the ceiling
    pub const CEILING_TOLERANCE: f64 = 1e-9;
}

/// External load increments
pub mod loading {
    /// Smallest available external load increment (kg)
    pub const SMALLEST_INCREMENT_KG: f64 = 1.25;
}

/// Default limits
pub mod limits {
    /// Session token lifetime in minutes
    pub const DEFAULT_SESSION_EXPIRY_MINUTES: i64 = 30;
    /// Longest accepted session token lifetime in minutes (one year)
    pub const MAX_SESSION_EXPIRY_MINUTES: i64 = 525_600;
    /// How long a connection waits on a locked database file before giving up
    pub const DATABASE_BUSY_TIMEOUT_SECS: u64 = 5;
    /// Minimum password length accepted at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Default number of workouts returned by a list request
    pub const DEFAULT_WORKOUT_LIST_LIMIT: u32 = 100;
    /// Upper bound on workouts returned by a list request
    pub const MAX_WORKOUT_LIST_LIMIT: u32 = 1000;
    /// Target reps used for a recommendation when the user has no history and gave none
    pub const DEFAULT_TARGET_REPS: u32 = 5;
    /// Length in bytes of a generated session signing secret
    pub const GENERATED_SECRET_BYTES: usize = 64;
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Default configuration values
pub mod defaults {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./database.db";
}

/// Service identifiers used in logs and token audiences
pub mod service_names {
    /// HTTP server service name
    pub const LIFTLOG_SERVER: &str = "liftlog-server";
    /// Audience claim of session tokens
    pub const SESSION_AUDIENCE: &str = "liftlog";
}

/// Cookie names
pub mod cookies {
    /// `HttpOnly` session cookie carrying the signed session token
    pub const SESSION_COOKIE: &str = "session_token";
}

/// Exercise catalogue seeded on startup: `(name, uses_bodyweight)`
pub mod seed {
    /// Exercises inserted when the catalogue is seeded
    pub const EXERCISES: &[(&str, bool)] = &[
        ("Pull-ups", true),
        ("Dips", true),
        ("Bench Press", false),
        ("Squat", false),
        ("Deadlift", false),
    ];
}

/// User-facing error messages
pub mod error_messages {
    /// Registration email failed validation
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
    /// Registration password too short
    pub const PASSWORD_TOO_WEAK: &str = "Password must be at least 8 characters long";
    /// Email already registered
    pub const USER_ALREADY_EXISTS: &str = "User with this email already exists";
    /// Login failed (same message for unknown email and wrong password)
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// No session cookie or authorization header
    pub const MISSING_CREDENTIALS: &str =
        "Missing session cookie or 'Authorization: Bearer <token>' header";
}
