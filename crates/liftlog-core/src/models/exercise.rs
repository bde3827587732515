// ABOUTME: Exercise catalogue model with the bodyweight-assisted flag
// ABOUTME: Exercise is the stored row, ExerciseProfile is what the recommendation engine consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use serde::{Deserialize, Serialize};

/// An exercise in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique display name, also the primary key
    pub name: String,
    /// Whether the lifter's bodyweight is part of the moved load (dips, pull-ups)
    pub uses_bodyweight: bool,
}

impl Exercise {
    /// Create a catalogue entry
    pub fn new(name: impl Into<String>, uses_bodyweight: bool) -> Self {
        Self {
            name: name.into(),
            uses_bodyweight,
        }
    }

    /// Metadata view consumed by the recommendation engine
    #[must_use]
    pub const fn profile(&self) -> ExerciseProfile {
        ExerciseProfile {
            uses_bodyweight: self.uses_bodyweight,
        }
    }
}

/// Exercise metadata relevant to load estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExerciseProfile {
    /// Total load equals external weight plus the lifter's bodyweight
    pub uses_bodyweight: bool,
}

impl ExerciseProfile {
    /// Profile for an exercise loaded purely with external weight
    pub const EXTERNAL_LOAD: Self = Self {
        uses_bodyweight: false,
    };

    /// Profile for a bodyweight-assisted exercise
    pub const BODYWEIGHT_ASSISTED: Self = Self {
        uses_bodyweight: true,
    };
}
