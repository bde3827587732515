// ABOUTME: Route handlers for logging sets and browsing workout history
// ABOUTME: Validation and bodyweight capture happen in storage; malformed input is a JSON 400
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::constants::limits::DEFAULT_WORKOUT_LIST_LIMIT;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::models::NewWorkout;
use crate::resources::ServerResources;

/// Query parameters for listing workouts
#[derive(Debug, Default, Deserialize)]
pub struct ListWorkoutsQuery {
    /// Only sets for this exercise
    pub exercise_name: Option<String>,
    /// Maximum number of sets, newest first
    pub limit: Option<u32>,
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", get(Self::handle_list).post(Self::handle_create))
            .with_state(resources)
    }

    /// Handle POST /workouts
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<NewWorkout>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;
        let Json(body) = body?;

        let workout = resources
            .database
            .create_workout(auth.user_id, &body)
            .await?;

        AppLogger::log_workout_logged(
            &auth.user_id.to_string(),
            &workout.exercise_name,
            workout.reps,
            workout.weight,
            workout.rpe,
        );

        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// Handle GET /workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ListWorkoutsQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;
        let Query(query) = query?;

        let workouts = resources
            .database
            .list_workouts(
                auth.user_id,
                query.exercise_name.as_deref(),
                query.limit.unwrap_or(DEFAULT_WORKOUT_LIST_LIMIT),
            )
            .await?;

        Ok(Json(workouts).into_response())
    }
}
