// ABOUTME: Session authentication middleware for request authentication
// ABOUTME: Resolves the session cookie or Bearer token to a live user and records activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use tracing::Span;
use uuid::Uuid;

use crate::auth::AuthManager;
use crate::constants::cookies::SESSION_COOKIE;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::security::cookies::get_cookie_value;

/// Where the session token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `session_token` cookie set at login
    SessionCookie,
    /// `Authorization: Bearer` header
    BearerToken,
}

impl AuthMethod {
    /// Stable label for logs and spans
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionCookie => "session_cookie",
            Self::BearerToken => "bearer_token",
        }
    }
}

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user
    pub user_id: Uuid,
    /// Email carried in the token
    pub email: String,
    /// How the caller authenticated
    pub auth_method: AuthMethod,
}

/// Middleware for session authentication
#[derive(Clone)]
pub struct SessionAuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl SessionAuthMiddleware {
    /// Create new session auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate request using headers (cookie first, then Authorization header)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credentials are present (`AuthRequired`)
    /// - The token is expired, malformed or has a bad signature
    /// - The token's user no longer exists
    /// - Database queries fail
    #[tracing::instrument(
        skip(self, headers),
        fields(
            auth_method = tracing::field::Empty,
            user_id = tracing::field::Empty,
            success = tracing::field::Empty,
        )
    )]
    pub async fn authenticate_request_with_headers(
        &self,
        headers: &HeaderMap,
    ) -> AppResult<AuthResult> {
        // Cookie first: browsers send it automatically
        if let Some(token) = get_cookie_value(headers, SESSION_COOKIE) {
            return self.authenticate_token(&token, AuthMethod::SessionCookie).await;
        }

        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        self.authenticate_request(auth_header).await
    }

    /// Authenticate from a raw `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when the header is absent, `AuthMalformed` when it is not a
    /// Bearer credential, and the token validation errors otherwise
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(header_value) = auth_header else {
            tracing::debug!("Authentication failed: no session cookie or authorization header");
            return Err(AppError::auth_required());
        };

        // Security: Do not log header content to prevent token leakage
        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::auth_malformed("Authorization header must be 'Bearer <session token>'")
            })?;

        self.authenticate_token(token, AuthMethod::BearerToken).await
    }

    async fn authenticate_token(&self, token: &str, method: AuthMethod) -> AppResult<AuthResult> {
        let span = Span::current();
        span.record("auth_method", method.as_str());

        let claims = match self.auth_manager.validate_token_detailed(token) {
            Ok(claims) => claims,
            Err(e) => {
                span.record("success", false);
                tracing::warn!(auth_method = method.as_str(), "Session token rejected: {e}");
                return Err(e.into());
            }
        };
        let user_id = claims.user_id()?;

        if self.database.get_user(user_id).await?.is_none() {
            span.record("success", false);
            AppLogger::log_security_event(
                "token_for_unknown_user",
                "medium",
                "Valid session token for a user that no longer exists",
                Some(&user_id.to_string()),
            );
            return Err(AppError::auth_invalid("User account no longer exists"));
        }

        self.database.update_last_active(user_id).await?;

        span.record("user_id", user_id.to_string())
            .record("success", true);
        tracing::debug!(%user_id, auth_method = method.as_str(), "Request authenticated");

        Ok(AuthResult {
            user_id,
            email: claims.email,
            auth_method: method,
        })
    }
}
