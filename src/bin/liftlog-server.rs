// ABOUTME: Server binary: loads configuration, opens storage and serves the HTTP API
// ABOUTME: Supports --http-port and --database-url overrides on top of environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Liftlog Server Binary
//!
//! Starts the workout logging API with session authentication and `SQLite` storage.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use liftlog::{
    config::environment::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    server::LiftlogServer,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "liftlog-server")]
#[command(about = "Liftlog - workout logging API with next-set load recommendations")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:./path.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    info!("Starting Liftlog server");
    info!("{}", config.summary());

    let host = config.host.to_string();
    let port = config.http_port;

    let resources = Arc::new(ServerResources::from_config(config).await?);
    info!(
        "Database ready with {} registered users",
        resources.database.get_user_count().await?
    );

    display_available_endpoints(&host, port);

    if let Err(e) = LiftlogServer::new(resources).run().await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available API Endpoints ===");
    display_health_endpoints(host, port);
    display_auth_endpoints(host, port);
    display_training_endpoints(host, port);
    info!("=== End of Endpoint List ===");
}

fn display_health_endpoints(host: &str, port: u16) {
    info!("Health:");
    info!("   Liveness:          GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
}

#[allow(clippy::cognitive_complexity)]
fn display_auth_endpoints(host: &str, port: u16) {
    info!("Authentication:");
    info!("   User Registration: POST http://{host}:{port}/auth/register");
    info!("   User Login:        POST http://{host}:{port}/auth/login");
    info!("   Logout:            POST http://{host}:{port}/auth/logout");
    info!("   Current User:      GET  http://{host}:{port}/auth/me");
}

#[allow(clippy::cognitive_complexity)]
fn display_training_endpoints(host: &str, port: u16) {
    info!("Training:");
    info!("   Exercises:         GET  http://{host}:{port}/exercises");
    info!("   Log Set:           POST http://{host}:{port}/workouts");
    info!("   Workout History:   GET  http://{host}:{port}/workouts?exercise_name=&limit=");
    info!("   Log Bodyweight:    POST http://{host}:{port}/bodyweight");
    info!("   Bodyweight History: GET http://{host}:{port}/bodyweight");
    info!("   Recommendation:    GET  http://{host}:{port}/recommendations/{{exercise_name}}?target_reps=");
}
