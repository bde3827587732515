// ABOUTME: Request and response types for authentication routes
// ABOUTME: Defines DTOs for registration, login and the current-user endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Authentication request and response types

use serde::{Deserialize, Serialize};

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be hashed)
    pub password: String,
    /// Optional display name for the user
    #[serde(default)]
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Unique identifier for the newly created user
    pub user_id: String,
    /// Success message for the registration
    pub message: String,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// Unique identifier for the user
    pub user_id: String,
    /// User's email address
    pub email: String,
    /// User's display name if set
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token, also set as the `session_token` cookie
    pub session_token: String,
    /// When the token expires (RFC 3339)
    pub expires_at: String,
    /// User information
    pub user: UserInfo,
}

/// Current user, as returned by `GET /auth/me`
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// Unique identifier for the user
    pub user_id: String,
    /// User's email address
    pub email: String,
    /// User's display name if set
    pub display_name: Option<String>,
    /// Latest logged bodyweight, `None` when nothing was logged
    pub current_bodyweight: Option<f64>,
}
