// ABOUTME: Route handlers for the bodyweight log
// ABOUTME: Records measurements and returns the history newest first
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

use crate::errors::AppError;
use crate::models::NewBodyweight;
use crate::resources::ServerResources;

/// Bodyweight routes handler
pub struct BodyweightRoutes;

impl BodyweightRoutes {
    /// Create all bodyweight routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/bodyweight",
                get(Self::handle_list).post(Self::handle_record),
            )
            .with_state(resources)
    }

    async fn handle_record(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<NewBodyweight>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;
        let Json(body) = body?;

        let entry = resources
            .database
            .record_bodyweight(auth.user_id, &body)
            .await?;

        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;

        let entries = resources.database.list_bodyweights(auth.user_id).await?;
        Ok(Json(entries).into_response())
    }
}
