// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, server resources and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `liftlog`

use std::env;
use std::sync::{Arc, Once};

use liftlog::{
    auth::{hash_password, AuthManager, SessionSecret},
    config::environment::{DatabaseConfig, DatabaseUrl, ServerConfig},
    database::Database,
    errors::AppResult,
    models::User,
    resources::ServerResources,
};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Password used for every test user
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        // Another test binary helper may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard seeded in-memory database
pub async fn create_test_database() -> AppResult<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    database.seed_exercises().await?;
    Ok(Arc::new(database))
}

/// Session manager with a fresh random secret
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(SessionSecret::generate(), 30).expect("Valid session expiry")
}

/// Configuration for an in-memory, seeded test server
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            seed_exercises: true,
        },
        ..ServerConfig::default()
    }
}

/// Complete server resources over an in-memory database
pub async fn create_test_server_resources() -> AppResult<Arc<ServerResources>> {
    init_test_logging();
    Ok(Arc::new(ServerResources::from_config(test_config()).await?))
}

/// Insert a user with [`TEST_PASSWORD`]
pub async fn create_test_user(database: &Database, email: &str) -> AppResult<User> {
    let user = User::new(
        email.to_owned(),
        hash_password(TEST_PASSWORD)?,
        Some("Test Lifter".to_owned()),
    );
    database.create_user(&user).await?;
    Ok(user)
}

/// Insert a user and issue a session token for it
pub async fn create_test_user_with_token(
    resources: &ServerResources,
) -> AppResult<(Uuid, String)> {
    let email = format!("lifter-{}@example.com", Uuid::new_v4().simple());
    let user = create_test_user(&resources.database, &email).await?;
    let session = resources.auth_manager.create_session(&user)?;
    Ok((user.id, session.session_token))
}
