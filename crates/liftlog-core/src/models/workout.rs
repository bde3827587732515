// ABOUTME: Logged workout sets and the historical set record fed to the recommendation engine
// ABOUTME: Includes request validation for new sets and the stored-row to SetRecord conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Exercise;
use crate::constants::rpe::{MAX_RPE, MIN_RPE};
use crate::errors::{AppError, AppResult};

/// A historical set as seen by the recommendation engine
///
/// `recorded_bodyweight` is `None` when no bodyweight was captured with the set. A
/// recorded bodyweight of `Some(0.0)` is a real measurement and is treated as such.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Repetitions performed
    pub reps: u32,
    /// External load in kilograms
    pub weight: f64,
    /// Rate of perceived exertion, 10 = no reps in reserve
    pub rpe: f64,
    /// Bodyweight captured with the set, bodyweight-assisted exercises only
    pub recorded_bodyweight: Option<f64>,
    /// When the set was performed
    pub performed_at: DateTime<Utc>,
}

impl SetRecord {
    /// Set performed now without a recorded bodyweight
    #[must_use]
    pub fn new(reps: u32, weight: f64, rpe: f64) -> Self {
        Self {
            reps,
            weight,
            rpe,
            recorded_bodyweight: None,
            performed_at: Utc::now(),
        }
    }

    /// Attach the bodyweight captured with the set
    #[must_use]
    pub const fn with_recorded_bodyweight(mut self, bodyweight: f64) -> Self {
        self.recorded_bodyweight = Some(bodyweight);
        self
    }

    /// Override the performance timestamp
    #[must_use]
    pub const fn performed_at(mut self, performed_at: DateTime<Utc>) -> Self {
        self.performed_at = performed_at;
        self
    }

    /// External weight plus the recorded bodyweight, if any
    #[must_use]
    pub fn total_load(&self) -> f64 {
        self.weight + self.recorded_bodyweight.unwrap_or(0.0)
    }
}

/// Request payload for logging a set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Catalogue exercise name
    pub exercise_name: String,
    /// Repetitions performed
    pub reps: u32,
    /// External load in kilograms; negative means assistance on bodyweight exercises
    pub weight: f64,
    /// Rate of perceived exertion
    pub rpe: f64,
}

impl NewWorkout {
    /// Validate the set against the exercise it is logged for
    ///
    /// # Errors
    ///
    /// Returns `AppError::invalid_input` when reps are zero, the RPE is outside
    /// `[0, 10]`, or the weight is not finite / negative on an external-load exercise
    pub fn validate(&self, exercise: &Exercise) -> AppResult<()> {
        if self.reps == 0 {
            return Err(AppError::invalid_input("Reps must be at least 1"));
        }

        if !self.rpe.is_finite() || !(MIN_RPE..=MAX_RPE).contains(&self.rpe) {
            return Err(AppError::invalid_input(format!(
                "RPE {} is outside the 0-10 scale",
                self.rpe
            )));
        }

        if !self.weight.is_finite() {
            return Err(AppError::invalid_input("Weight must be a finite number"));
        }

        if self.weight < 0.0 && !exercise.uses_bodyweight {
            return Err(AppError::invalid_input(format!(
                "Negative weight is only allowed for bodyweight exercises, '{}' uses external load only",
                exercise.name
            )));
        }

        Ok(())
    }
}

/// A stored set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Row identifier
    pub id: i64,
    /// Owner
    pub user_id: Uuid,
    /// Catalogue exercise name
    pub exercise_name: String,
    /// Repetitions performed
    pub reps: u32,
    /// External load in kilograms
    pub weight: f64,
    /// Rate of perceived exertion
    pub rpe: f64,
    /// Bodyweight captured at logging time, bodyweight-assisted exercises only
    pub bodyweight: Option<f64>,
    /// When the set was logged
    pub created_at: DateTime<Utc>,
}

impl WorkoutRecord {
    /// Engine view of this set
    #[must_use]
    pub fn to_set_record(&self) -> SetRecord {
        SetRecord {
            reps: self.reps,
            weight: self.weight,
            rpe: self.rpe,
            recorded_bodyweight: self.bodyweight,
            performed_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> Exercise {
        Exercise::new("Bench Press", false)
    }

    fn dips() -> Exercise {
        Exercise::new("Dips", true)
    }

    fn workout(reps: u32, weight: f64, rpe: f64) -> NewWorkout {
        NewWorkout {
            exercise_name: "Bench Press".into(),
            reps,
            weight,
            rpe,
        }
    }

    #[test]
    fn test_valid_workout() {
        assert!(workout(5, 100.0, 8.0).validate(&bench()).is_ok());
        assert!(workout(1, 0.0, 10.0).validate(&bench()).is_ok());
        assert!(workout(3, 20.0, 0.0).validate(&bench()).is_ok());
    }

    #[test]
    fn test_rejects_zero_reps_and_bad_rpe() {
        assert!(workout(0, 100.0, 8.0).validate(&bench()).is_err());
        assert!(workout(5, 100.0, 10.5).validate(&bench()).is_err());
        assert!(workout(5, 100.0, -1.0).validate(&bench()).is_err());
        assert!(workout(5, 100.0, f64::NAN).validate(&bench()).is_err());
    }

    #[test]
    fn test_negative_weight_only_for_bodyweight_exercises() {
        assert!(workout(8, -10.0, 8.0).validate(&bench()).is_err());
        assert!(workout(8, -10.0, 8.0).validate(&dips()).is_ok());
        assert!(workout(8, f64::INFINITY, 8.0).validate(&dips()).is_err());
    }

    #[test]
    fn test_zero_bodyweight_is_distinct_from_none() {
        let none = SetRecord::new(5, 20.0, 8.0);
        let zero = SetRecord::new(5, 20.0, 8.0).with_recorded_bodyweight(0.0);
        assert_ne!(none, zero);
        assert_eq!(none.total_load(), zero.total_load());
        assert_eq!(zero.recorded_bodyweight, Some(0.0));
    }

    #[test]
    fn test_workout_record_to_set_record() {
        let record = WorkoutRecord {
            id: 7,
            user_id: Uuid::new_v4(),
            exercise_name: "Dips".into(),
            reps: 8,
            weight: 15.0,
            rpe: 9.0,
            bodyweight: Some(80.0),
            created_at: Utc::now(),
        };
        let set = record.to_set_record();
        assert_eq!(set.reps, 8);
        assert_eq!(set.total_load(), 95.0);
        assert_eq!(set.performed_at, record.created_at);
    }
}
