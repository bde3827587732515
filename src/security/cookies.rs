// ABOUTME: Session cookie helpers for reading the Cookie header and building Set-Cookie values
// ABOUTME: Cookies are HttpOnly, SameSite=Lax and scoped to the whole API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Duration;

use crate::errors::{AppError, AppResult};

/// Find a cookie by name across every `Cookie` header of the request
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token for `max_age`
///
/// # Errors
///
/// Returns an internal error if the token contains bytes not allowed in a header
pub fn session_cookie(name: &str, token: &str, max_age: Duration) -> AppResult<HeaderValue> {
    build_cookie(name, token, max_age.num_seconds().max(0))
}

/// `Set-Cookie` value that removes the cookie
///
/// # Errors
///
/// Returns an internal error if `name` is not a valid header value
pub fn clear_cookie(name: &str) -> AppResult<HeaderValue> {
    build_cookie(name, "", 0)
}

fn build_cookie(name: &str, value: &str, max_age_seconds: i64) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_seconds}"
    ))
    .map_err(|e| AppError::internal(format!("Invalid cookie value: {e}")))
}
