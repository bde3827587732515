// ABOUTME: User account, bodyweight log and profile models
// ABOUTME: Profile carries the current bodyweight the recommendation engine subtracts from total load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier
    pub id: Uuid,
    /// Login email, unique
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Argon2 PHC string, never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last successful authentication
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            created_at: now,
            last_active: now,
        }
    }
}

/// The user's latest known body measurements
///
/// `current_bodyweight` is the bodyweight component of a *new* recommendation, as
/// opposed to the bodyweight captured alongside a historical set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Latest bodyweight in kilograms
    pub current_bodyweight: f64,
}

impl Profile {
    /// Profile with a known bodyweight
    #[must_use]
    pub const fn new(current_bodyweight: f64) -> Self {
        Self { current_bodyweight }
    }

    /// Profile built from the latest bodyweight log entry, zero when nothing was logged
    #[must_use]
    pub fn from_latest(latest: Option<f64>) -> Self {
        Self::new(latest.unwrap_or(0.0))
    }
}

/// One bodyweight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyweightEntry {
    /// Row identifier
    pub id: i64,
    /// Owner
    pub user_id: Uuid,
    /// Bodyweight in kilograms
    pub weight: f64,
    /// When it was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Request payload for logging a bodyweight
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewBodyweight {
    /// Bodyweight in kilograms
    pub weight: f64,
}

impl NewBodyweight {
    /// Reject non-finite or non-positive bodyweights
    ///
    /// # Errors
    ///
    /// Returns `AppError::invalid_input` if the weight is not a positive finite number
    pub fn validate(&self) -> AppResult<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "Bodyweight must be a positive number of kilograms, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_to_zero_without_entries() {
        assert_eq!(Profile::from_latest(None).current_bodyweight, 0.0);
        assert_eq!(Profile::from_latest(Some(82.5)).current_bodyweight, 82.5);
    }

    #[test]
    fn test_bodyweight_validation() {
        assert!(NewBodyweight { weight: 80.0 }.validate().is_ok());
        assert!(NewBodyweight { weight: 0.0 }.validate().is_err());
        assert!(NewBodyweight { weight: -5.0 }.validate().is_err());
        assert!(NewBodyweight { weight: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("a@b.co".into(), "$argon2id$secret".into(), None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
