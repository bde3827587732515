// ABOUTME: Authentication route handlers for registration, login, logout and current user
// ABOUTME: AuthService holds the business rules; handlers only translate HTTP to and from it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Authentication routes
//!
//! Login issues a session token both as an `HttpOnly` cookie and in the JSON body, so
//! browser clients and API clients can authenticate the same way afterwards.

pub mod types;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::task;

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::constants::{cookies::SESSION_COOKIE, error_messages, limits};
use crate::database::Database;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::User;
use crate::resources::ServerResources;
use crate::security::cookies::{clear_cookie, session_cookie};

pub use types::{
    CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo,
};

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthService {
    /// Create an auth service over shared resources
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Build from the server's resource container
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(
            Arc::clone(&resources.auth_manager),
            Arc::clone(&resources.database),
        )
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad email or weak password, `ResourceAlreadyExists`
    /// for a taken email, or an internal/database error
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let email = normalize_email(&request.email);
        tracing::info!("User registration attempt for email: {email}");

        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
        }

        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(error_messages::PASSWORD_TOO_WEAK));
        }

        if self.database.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::new(
                ErrorCode::ResourceAlreadyExists,
                error_messages::USER_ALREADY_EXISTS,
            ));
        }

        // Hashing runs on the blocking pool
        let password = request.password;
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

        let display_name = request
            .display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        let user = User::new(email, password_hash, display_name);
        let user_id = self.database.create_user(&user).await?;

        AppLogger::log_auth_event(&user_id.to_string(), "register", true, None);

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for bad credentials, or an internal/database error
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::invalid_input(error_messages::MISSING_CREDENTIALS));
        }

        let Some(user) = self.database.get_user_by_email(&email).await? else {
            AppLogger::log_auth_event("unknown", "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        };

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))??;

        if !is_valid {
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        self.database.update_last_active(user.id).await?;
        let session = self.auth_manager.create_session(&user)?;

        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        Ok(LoginResponse {
            session_token: session.session_token,
            expires_at: session.expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    /// Simple email validation
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false; // @ at start or end
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.') && !domain_part.contains('@')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= limits::MIN_PASSWORD_LENGTH
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/logout", post(Self::handle_logout))
            .route("/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = request?;
        let response = AuthService::from_resources(&resources)
            .register(request)
            .await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /auth/login - sets the session cookie
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = request?;
        let response = AuthService::from_resources(&resources)
            .login(request)
            .await?;

        let cookie = session_cookie(
            SESSION_COOKIE,
            &response.session_token,
            resources.auth_manager.session_expiry(),
        )?;

        Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)).into_response())
    }

    /// Handle POST /auth/logout - clears the session cookie
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;
        AppLogger::log_auth_event(&auth.user_id.to_string(), "logout", true, None);

        Ok((
            StatusCode::NO_CONTENT,
            [(header::SET_COOKIE, clear_cookie(SESSION_COOKIE)?)],
        )
            .into_response())
    }

    /// Handle GET /auth/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources
            .auth_middleware
            .authenticate_request_with_headers(&headers)
            .await?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;
        let current_bodyweight = resources.database.current_bodyweight(user.id).await?;

        Ok(Json(CurrentUserResponse {
            user_id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            current_bodyweight,
        })
        .into_response())
    }
}
