// ABOUTME: Centralized resource container for dependency injection in the HTTP server
// ABOUTME: Builds the database, session manager and auth middleware once and shares them via Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Server Resources
//!
//! Shared state is constructed once at startup and handed to every route as
//! `Arc<ServerResources>`; nothing is kept in globals.

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::{AuthManager, SessionSecret};
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::middleware::SessionAuthMiddleware;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Storage handle
    pub database: Arc<Database>,
    /// Session token issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// Request authentication shared by all protected routes
    pub auth_middleware: Arc<SessionAuthMiddleware>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire already-constructed resources together
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = Arc::new(SessionAuthMiddleware::new(
            Arc::clone(&auth_manager),
            Arc::clone(&database),
        ));

        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }

    /// Open the configured database, seed it if requested, and build the session manager
    ///
    /// Without a configured `JWT_SECRET` a random secret is generated, so sessions do
    /// not survive a restart. Production configs are rejected earlier by validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, migrated or seeded, or the
    /// session expiry is out of range
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.url.to_connection_string()).await?;
        if config.database.seed_exercises {
            database.seed_exercises().await?;
        }

        let secret = if let Some(secret) = config.auth.jwt_secret.clone() {
            secret
        } else {
            debug!("Generated a per-process session secret");
            SessionSecret::generate()
        };
        let auth_manager = AuthManager::new(secret, config.auth.session_expiry_minutes)?;

        info!("Server resources initialized");
        Ok(Self::new(database, auth_manager, Arc::new(config)))
    }
}
