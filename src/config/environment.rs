// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses bind address, database URL, session settings and deployment mode from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::SessionSecret;
use crate::constants::{defaults, env_vars, limits, ports};
use crate::errors::{AppError, AppResult};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe `SQLite` database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests, throwaway runs)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns a config error for non-SQLite URLs or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            return Err(AppError::config(
                "Only SQLite databases are supported (DATABASE_URL=sqlite:<path>)",
            ));
        }

        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        match path_str {
            "" => Err(AppError::config("DATABASE_URL has an empty path")),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./database.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Insert the default exercise catalogue on startup
    pub seed_exercises: bool,
}

/// Session settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Explicit signing secret; `None` means generate one per process
    pub jwt_secret: Option<SessionSecret>,
    /// Session token lifetime in minutes
    pub session_expiry_minutes: i64,
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: IpAddr,
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            http_port: ports::DEFAULT_HTTP_PORT,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                seed_exercises: true,
            },
            auth: AuthConfig {
                jwt_secret: None,
                session_expiry_minutes: limits::DEFAULT_SESSION_EXPIRY_MINUTES,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when a variable is present but unparsable, or when
    /// validation fails (see [`ServerConfig::validate`])
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: parse_env_or(env_vars::HOST, defaults::DEFAULT_HOST)?,
            http_port: parse_env_or(env_vars::HTTP_PORT, &ports::DEFAULT_HTTP_PORT.to_string())?,
            log_level: LogLevel::from_str_or_default(&env_var_or(env_vars::RUST_LOG, "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    env_vars::DATABASE_URL,
                    defaults::DEFAULT_DATABASE_URL,
                ))?,
                seed_exercises: parse_env_or(env_vars::SEED_EXERCISES, "true")?,
            },
            auth: AuthConfig {
                jwt_secret: env::var(env_vars::JWT_SECRET)
                    .ok()
                    .filter(|secret| !secret.is_empty())
                    .map(SessionSecret::from),
                session_expiry_minutes: parse_env_or(
                    env_vars::SESSION_EXPIRY_MINUTES,
                    &limits::DEFAULT_SESSION_EXPIRY_MINUTES.to_string(),
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a config error if the session expiry is not between one minute and
    /// `MAX_SESSION_EXPIRY_MINUTES`, or production runs without an explicit `JWT_SECRET`
    pub fn validate(&self) -> AppResult<()> {
        let expiry = self.auth.session_expiry_minutes;
        if !(1..=limits::MAX_SESSION_EXPIRY_MINUTES).contains(&expiry) {
            return Err(AppError::config(format!(
                "{} must be between 1 and {}, got {expiry}",
                env_vars::SESSION_EXPIRY_MINUTES,
                limits::MAX_SESSION_EXPIRY_MINUTES
            )));
        }

        if self.auth.jwt_secret.is_none() {
            if self.environment.is_production() {
                return Err(AppError::config(format!(
                    "{} is required in production",
                    env_vars::JWT_SECRET
                )));
            }
            warn!(
                "{} not set, generating a per-process secret; sessions will not survive restarts",
                env_vars::JWT_SECRET
            );
        }

        if self.database.url.is_memory() && self.environment.is_production() {
            warn!("Production is running on an in-memory database, all data is lost on exit");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Liftlog Server Configuration:\n\
             - Bind Address: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Seed Exercises: {}\n\
             - Session Expiry: {} minutes\n\
             - Session Secret: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            self.database.url,
            self.database.seed_exercises,
            self.auth.session_expiry_minutes,
            if self.auth.jwt_secret.is_some() {
                "Configured"
            } else {
                "Generated"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse environment variable (or the default) into `T`
fn parse_env_or<T>(key: &str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = env_var_or(key, default);
    raw.trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
}
