// ABOUTME: Route handlers for the exercise catalogue
// ABOUTME: Lists exercises with their bodyweight flag and lets users add new ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Exercise;
use crate::resources::ServerResources;

/// Body for adding an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    /// Unique exercise name
    pub name: String,
    /// Whether bodyweight is part of the moved load
    #[serde(default)]
    pub uses_bodyweight: bool,
}

/// Exercise catalogue routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/exercises",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(resources)
    }

    /// Handle GET /exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;

        let exercises = resources.database.list_exercises().await?;
        Ok(Json(exercises).into_response())
    }

    /// Handle POST /exercises
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CreateExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;
        let Json(body) = body?;

        let exercise = Exercise::new(body.name.trim(), body.uses_bodyweight);
        resources.database.create_exercise(&exercise).await?;

        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }
}
