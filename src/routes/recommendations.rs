// ABOUTME: Route handler for next-set load recommendations
// ABOUTME: Authenticates, reads the engine inputs on one pooled connection, then builds the table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::services::recommendations::{build_table, load_inputs};

/// Query parameters for a recommendation
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    /// Rep count to recommend loads for; defaults to the last set's reps
    pub target_reps: Option<u32>,
}

/// Recommendation routes handler
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/recommendations/:exercise_name",
                get(Self::handle_recommend),
            )
            .with_state(resources)
    }

    /// Handle GET /recommendations/:exercise_name
    async fn handle_recommend(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(exercise_name): Path<String>,
        query: Result<Query<RecommendationQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        // Authenticate before checking out a connection for the lookups
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;
        let Query(query) = query?;

        let inputs = load_inputs(&resources.database, auth.user_id, &exercise_name).await?;
        let table = build_table(inputs, query.target_reps)?;

        AppLogger::log_recommendation(
            &auth.user_id.to_string(),
            &table.exercise_name,
            table.target_reps,
            table.rows.len(),
        );

        Ok(Json(table).into_response())
    }
}
