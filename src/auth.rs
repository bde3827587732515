// ABOUTME: Session token issuing and validation plus Argon2 password hashing
// ABOUTME: HS256 JWTs carry the user id; detailed validation errors distinguish expiry from tampering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Authentication and Session Management
//!
//! Users log in with email and password; the server answers with an HS256 session
//! token that clients present either as the `session_token` cookie or as a bearer
//! token. Tokens are stateless, so logging out only clears the cookie.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::{limits::GENERATED_SECRET_BYTES, service_names::SESSION_AUDIENCE};
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// HS256 signing secret, redacted from debug output
#[derive(Clone)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    /// Wrap raw key bytes
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Random secret for a single process lifetime
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_jwt_secret().to_vec())
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<String> for SessionSecret {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes())
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionSecret([REDACTED; {} bytes])", self.0.len())
    }
}

/// Generate a random session signing secret
#[must_use]
pub fn generate_jwt_secret() -> [u8; GENERATED_SECRET_BYTES] {
    let mut secret = [0u8; GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error(
        "Session token expired {} minutes ago at {}",
        current_time.signed_duration_since(*expired_at).num_minutes(),
        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
    )]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    #[error("Session token is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    #[error("Session token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match &error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { .. } => Self::auth_invalid(error.to_string()),
            JwtValidationError::TokenMalformed { .. } => Self::auth_malformed(error.to_string()),
        }
    }
}

/// `JWT` claims for user sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience
    pub aud: String,
}

impl Claims {
    /// Parse the subject as a user id
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the subject is not a UUID
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::auth_invalid("Invalid user ID in token"))
    }
}

/// Issued session token and its expiry
#[derive(Debug, Clone)]
pub struct UserSession {
    /// Owner
    pub user_id: Uuid,
    /// Signed token
    pub session_token: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Authentication manager for session tokens
#[derive(Debug, Clone)]
pub struct AuthManager {
    secret: SessionSecret,
    session_expiry: Duration,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Errors
    ///
    /// Returns a config error if the expiry is not positive or does not fit a duration
    pub fn new(secret: SessionSecret, session_expiry_minutes: i64) -> AppResult<Self> {
        let session_expiry = Duration::try_minutes(session_expiry_minutes)
            .filter(|expiry| *expiry > Duration::zero())
            .ok_or_else(|| {
                AppError::config(format!(
                    "Session expiry of {session_expiry_minutes} minutes is out of range"
                ))
            })?;

        Ok(Self {
            secret,
            session_expiry,
        })
    }

    /// Session lifetime
    #[must_use]
    pub const fn session_expiry(&self) -> Duration {
        self.session_expiry
    }

    /// Issue a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn create_session(&self, user: &User) -> AppResult<UserSession> {
        self.create_session_at(user, Utc::now())
    }

    /// Issue a session token as if it were `now`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the expiry overflows or encoding fails
    pub fn create_session_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<UserSession> {
        let expires_at = now
            .checked_add_signed(self.session_expiry)
            .ok_or_else(|| AppError::internal("Session expiry is past the representable range"))?;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: SESSION_AUDIENCE.to_owned(),
        };

        let session_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))?;

        Ok(UserSession {
            user_id: user.id,
            session_token,
            expires_at,
        })
    }

    /// Validate a session token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is malformed, carries a bad
    /// signature or audience, or has expired
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::validate_claims_expiry(&claims)?;
        debug!("Session token validation successful for user: {}", claims.sub);
        Ok(claims)
    }

    /// Decode claims without expiry validation so expiry can be reported precisely
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[SESSION_AUDIENCE]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn validate_claims_expiry(claims: &Claims) -> Result<(), JwtValidationError> {
        let current_time = Utc::now();
        if current_time.timestamp() < claims.exp {
            return Ok(());
        }

        let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
        warn!(
            "Session token expired for user: {} at {}",
            claims.sub,
            expired_at.to_rfc3339()
        );
        Err(JwtValidationError::TokenExpired {
            expired_at,
            current_time,
        })
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        warn!("Session token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token was not issued for this service".into(),
            },
            ErrorKind::InvalidAlgorithm => JwtValidationError::TokenInvalid {
                reason: "Token uses an unsupported signing algorithm".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Hash a password with Argon2id and a random salt, returning the PHC string
///
/// CPU-heavy; call from `spawn_blocking` in async code.
///
/// # Errors
///
/// Returns an internal error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored PHC string
///
/// CPU-heavy; call from `spawn_blocking` in async code.
///
/// # Errors
///
/// Returns an internal error if the stored hash cannot be parsed
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::internal(format!("Stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
