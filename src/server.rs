// ABOUTME: HTTP server assembly: merges domain routers, applies tracing layers and serves
// ABOUTME: Runs until Ctrl-C or SIGTERM, then drains in-flight requests before returning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Liftlog Server
//!
//! [`build_router`] is the whole HTTP surface; integration tests drive it in-process and
//! [`LiftlogServer::run`] binds it to the configured address.

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tracing::{error, info, warn};

use crate::errors::{AppError, AppResult};
use crate::middleware::{propagate_request_id_layer, set_request_id_layer, trace_layer};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, BodyweightRoutes, ExerciseRoutes, HealthRoutes, RecommendationRoutes,
    WorkoutRoutes,
};

/// Request bodies above this size are rejected before deserialization
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let middlewares = ServiceBuilder::new()
        .layer(set_request_id_layer())
        .layer(trace_layer())
        .layer(propagate_request_id_layer());

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ExerciseRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(BodyweightRoutes::routes(Arc::clone(&resources)))
        .merge(RecommendationRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(middlewares)
}

/// The Liftlog HTTP server
pub struct LiftlogServer {
    resources: Arc<ServerResources>,
}

impl LiftlogServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    pub async fn run(self) -> AppResult<()> {
        let addr = SocketAddr::new(
            self.resources.config.host,
            self.resources.config.http_port,
        );
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::config(format!("Failed to bind {addr}: {e}")).with_source(e))?;

        self.serve(listener).await
    }

    /// Serve on an already-bound listener
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails while accepting connections
    pub async fn serve(self, listener: TcpListener) -> AppResult<()> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::internal(format!("Listener has no local address: {e}")))?;
        info!("Listening on http://{local_addr}");

        let app = build_router(self.resources);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("Server error: {e}");
                AppError::internal(format!("Server error: {e}")).with_source(e)
            })?;

        info!("Server stopped");
        Ok(())
    }
}

/// Resolve on Ctrl-C or SIGTERM
///
/// A signal handler that cannot be installed is logged and never fires, leaving the
/// other one in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    let sig = tokio::select! {
        () = ctrl_c => "Ctrl+C",
        () = terminate => "SIGTERM",
    };

    warn!("Received {sig}, shutting down...");
}
