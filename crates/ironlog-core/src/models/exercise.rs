// ABOUTME: Exercise catalog entry model and exercise type enumeration
// ABOUTME: Exercises are immutable once created; only custom entries may be deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Weight / reps based training
    #[default]
    Strength,
    /// Conditioning work (running, rope)
    Cardio,
    /// Mobility and stretching
    Flexibility,
}

impl ExerciseType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cardio" => Self::Cardio,
            "flexibility" => Self::Flexibility,
            // Default to Strength for unrecognized values
            _ => Self::Strength,
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exercise from the catalog or created by the user
///
/// # Examples
///
/// ```rust
/// use ironlog_core::models::{Exercise, ExerciseType};
///
/// let exercise = Exercise::new("1", "Bench Press", ExerciseType::Strength, &["chest", "triceps"]);
/// assert!(exercise.targets("Chest"));
/// assert!(!exercise.custom);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Catalog identifier ("1".."20" for built-ins, UUID for custom entries)
    pub id: String,
    /// Display name, unique case-insensitively across the library
    pub name: String,
    /// Exercise kind
    #[serde(rename = "type", default)]
    pub exercise_type: ExerciseType,
    /// Muscle group tags
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    /// Instructional text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Whether the user created this entry
    #[serde(default)]
    pub custom: bool,
}

impl Exercise {
    /// Create a built-in style exercise without instructions
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        exercise_type: ExerciseType,
        muscle_groups: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            exercise_type,
            muscle_groups: muscle_groups.iter().map(|m| (*m).to_owned()).collect(),
            instructions: None,
            custom: false,
        }
    }

    /// Attach instructional text
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Whether any muscle group tag matches `group` case-insensitively
    #[must_use]
    pub fn targets(&self, group: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|m| m.eq_ignore_ascii_case(group))
    }

    /// Case-insensitive substring match on the name or any muscle group
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .muscle_groups
                .iter()
                .any(|m| m.to_lowercase().contains(&needle))
    }
}
