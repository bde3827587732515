// ABOUTME: HTTP integration tests for the full Liftlog router
// ABOUTME: Drives registration, logging, history and recommendations through in-process requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! End-to-end HTTP tests for the Liftlog API
//!
//! Every test builds the complete router (all routes plus the request-id and tracing
//! layers) over a fresh in-memory database.

mod common;
mod helpers;

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use helpers::axum_test::AxumTestRequest;
use liftlog::resources::ServerResources;
use liftlog::server::build_router;
use serde_json::{json, Value};

struct TestApp {
    resources: Arc<ServerResources>,
}

impl TestApp {
    async fn new() -> Self {
        Self {
            resources: common::create_test_server_resources().await.unwrap(),
        }
    }

    fn router(&self) -> Router {
        build_router(Arc::clone(&self.resources))
    }

    /// Register and log in, returning the session token
    async fn login(&self, email: &str) -> String {
        AxumTestRequest::post("/auth/register")
            .json(&json!({ "email": email, "password": "squat-every-day" }))
            .send(self.router())
            .await
            .assert_status(StatusCode::CREATED);

        let body: Value = AxumTestRequest::post("/auth/login")
            .json(&json!({ "email": email, "password": "squat-every-day" }))
            .send(self.router())
            .await
            .assert_status(StatusCode::OK)
            .json();
        body["session_token"].as_str().unwrap().to_owned()
    }

    async fn log_set(
        &self,
        token: &str,
        exercise: &str,
        reps: u32,
        weight: f64,
        rpe: f64,
    ) -> Value {
        AxumTestRequest::post("/workouts")
            .bearer(token)
            .json(&json!({
                "exercise_name": exercise,
                "reps": reps,
                "weight": weight,
                "rpe": rpe,
            }))
            .send(self.router())
            .await
            .assert_status(StatusCode::CREATED)
            .json()
    }
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::get("/health").send(app.router()).await;
    assert_eq!(response.status(), 200);
    assert!(response.header("x-request-id").is_some());
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    let body: Value = AxumTestRequest::get("/ready")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_incoming_request_id_is_propagated() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(app.router())
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("trace-me-123"));
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_register_login_me_logout() {
    let app = TestApp::new().await;

    let registered: Value = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": "Flow@Example.com",
            "password": "squat-every-day",
            "display_name": "Flow"
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert!(registered["user_id"].is_string());

    let duplicate: Value = AxumTestRequest::post("/auth/register")
        .json(&json!({ "email": "flow@example.com", "password": "another-password" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(duplicate["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    let login = AxumTestRequest::post("/auth/login")
        .json(&json!({ "email": "flow@example.com", "password": "squat-every-day" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::OK);
    let cookie = login.header("set-cookie").unwrap();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));
    let body: Value = login.json();
    assert_eq!(body["user"]["user_id"], registered["user_id"]);
    assert_eq!(body["user"]["display_name"], "Flow");

    // The cookie alone authenticates
    let session_cookie = cookie.split(';').next().unwrap().to_owned();
    let me: Value = AxumTestRequest::get("/auth/me")
        .cookie(&session_cookie)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["email"], "flow@example.com");
    assert!(me["current_bodyweight"].is_null());

    let logout = AxumTestRequest::post("/auth/logout")
        .cookie(&session_cookie)
        .send(app.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(logout.header("set-cookie").unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_bad_credentials() {
    let app = TestApp::new().await;
    app.login("known@example.com").await;

    let body: Value = AxumTestRequest::post("/auth/login")
        .json(&json!({ "email": "known@example.com", "password": "wrong-password" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");

    AxumTestRequest::post("/auth/register")
        .json(&json!({ "email": "weak@example.com", "password": "short" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::new().await;

    for uri in [
        "/exercises",
        "/workouts",
        "/bodyweight",
        "/auth/me",
        "/recommendations/Squat",
    ] {
        let body: Value = AxumTestRequest::get(uri)
            .send(app.router())
            .await
            .assert_status(StatusCode::UNAUTHORIZED)
            .json();
        assert_eq!(body["error"]["code"], "AUTH_REQUIRED", "{uri}");
    }

    AxumTestRequest::get("/exercises")
        .bearer("garbage")
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Exercises, sets and bodyweight
// ============================================================================

#[tokio::test]
async fn test_exercise_catalogue() {
    let app = TestApp::new().await;
    let token = app.login("catalogue@example.com").await;

    let exercises: Value = AxumTestRequest::get("/exercises")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(exercises.as_array().unwrap().len(), 5);

    AxumTestRequest::post("/exercises")
        .bearer(&token)
        .json(&json!({ "name": "Muscle-ups", "uses_bodyweight": true }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);

    AxumTestRequest::post("/exercises")
        .bearer(&token)
        .json(&json!({ "name": "Muscle-ups" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_logging_sets_and_history() {
    let app = TestApp::new().await;
    let token = app.login("history@example.com").await;

    AxumTestRequest::post("/bodyweight")
        .bearer(&token)
        .json(&json!({ "weight": 80.0 }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);

    let dips = app.log_set(&token, "Dips", 8, 10.0, 8.0).await;
    assert_close(&dips["bodyweight"], 80.0);

    let bench = app.log_set(&token, "Bench Press", 5, 100.0, 8.0).await;
    assert!(bench["bodyweight"].is_null());

    let all: Value = AxumTestRequest::get("/workouts")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["exercise_name"], "Bench Press");
    assert_eq!(all[1]["exercise_name"], "Dips");

    let filtered: Value = AxumTestRequest::get("/workouts?exercise_name=Dips&limit=10")
        .bearer(&token)
        .send(app.router())
        .await
        .json();
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let me: Value = AxumTestRequest::get("/auth/me")
        .bearer(&token)
        .send(app.router())
        .await
        .json();
    assert_close(&me["current_bodyweight"], 80.0);
}

#[tokio::test]
async fn test_invalid_sets_are_rejected() {
    let app = TestApp::new().await;
    let token = app.login("invalid@example.com").await;

    let body: Value = AxumTestRequest::post("/workouts")
        .bearer(&token)
        .json(&json!({ "exercise_name": "Squat", "reps": 5, "weight": -20.0, "rpe": 8.0 }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    AxumTestRequest::post("/workouts")
        .bearer(&token)
        .json(&json!({ "exercise_name": "Squat", "reps": 5, "weight": 100.0, "rpe": 11.0 }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::post("/workouts")
        .bearer(&token)
        .json(&json!({ "exercise_name": "Curl", "reps": 5, "weight": 20.0, "rpe": 8.0 }))
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::post("/bodyweight")
        .bearer(&token)
        .json(&json!({ "weight": 0.0 }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
async fn test_recommendation_without_history() {
    let app = TestApp::new().await;
    let token = app.login("fresh@example.com").await;

    let body: Value = AxumTestRequest::get("/recommendations/Squat")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["exercise_name"], "Squat");
    assert_eq!(body["target_reps"], 5);
    assert!(body["based_on"].is_null());
    assert!(body["estimated_one_rep_max"].is_null());
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendation_for_external_load() {
    let app = TestApp::new().await;
    let token = app.login("bench@example.com").await;
    app.log_set(&token, "Bench Press", 5, 100.0, 8.0).await;

    let body: Value = AxumTestRequest::get("/recommendations/Bench%20Press")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["target_reps"], 5);
    assert_close(&body["estimated_one_rep_max"], 120.0);
    assert_eq!(body["based_on"]["reps"], 5);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert_close(&rows[0]["target_rpe"], 6.0);
    assert_close(&rows[8]["target_rpe"], 10.0);
    assert_close(&rows[4]["target_rpe"], 8.0);
    assert_close(&rows[4]["recommended_weight"], 100.0);

    // Weights climb with target RPE and sit on the 1.25 kg grid
    for pair in rows.windows(2) {
        assert!(pair[0]["recommended_weight"].as_f64() <= pair[1]["recommended_weight"].as_f64());
    }
    for row in rows {
        let steps = row["recommended_weight"].as_f64().unwrap() / 1.25;
        assert!((steps - steps.round()).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_recommendation_for_bodyweight_exercise() {
    let app = TestApp::new().await;
    let token = app.login("dips@example.com").await;

    AxumTestRequest::post("/bodyweight")
        .bearer(&token)
        .json(&json!({ "weight": 80.0 }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);
    app.log_set(&token, "Dips", 8, 10.0, 8.0).await;

    let body: Value = AxumTestRequest::get("/recommendations/Dips")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["uses_bodyweight"], true);
    assert_eq!(body["target_reps"], 8);
    assert_close(&body["current_bodyweight"], 80.0);
    assert_close(&body["estimated_one_rep_max"], 120.0);
    assert_close(&body["rows"][4]["recommended_weight"], 10.0);
}

#[tokio::test]
async fn test_recommendation_errors() {
    let app = TestApp::new().await;
    let token = app.login("errors@example.com").await;

    let body: Value = AxumTestRequest::get("/recommendations/Curl")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    AxumTestRequest::get("/recommendations/Squat?target_reps=0")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // 32 reps at RPE 5 puts the effective rep count on the formula's pole
    app.log_set(&token, "Squat", 32, 60.0, 5.0).await;
    let body: Value = AxumTestRequest::get("/recommendations/Squat?target_reps=5")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_malformed_parameters_get_json_errors() {
    let app = TestApp::new().await;
    let token = app.login("malformed@example.com").await;

    let body: Value = AxumTestRequest::get("/recommendations/Squat?target_reps=abc")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(body["error"]["message"].is_string());

    let body: Value = AxumTestRequest::get("/workouts?limit=-1")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let body: Value = AxumTestRequest::post("/workouts")
        .bearer(&token)
        .json(&json!({ "exercise_name": "Squat", "reps": "five" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    // Authentication is still checked before the parameters
    AxumTestRequest::get("/recommendations/Squat?target_reps=abc")
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recommendations_use_only_own_history() {
    let app = TestApp::new().await;
    let alice = app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;
    app.log_set(&alice, "Deadlift", 3, 180.0, 9.0).await;

    let body: Value = AxumTestRequest::get("/recommendations/Deadlift")
        .bearer(&bob)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(body["rows"].as_array().unwrap().is_empty());
}
