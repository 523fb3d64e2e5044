// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, analytics thresholds and workout defaults for Ironlog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Keys used in the local key-value cache
pub mod storage_keys {
    /// Workout history persisted in local-only mode (`{"workouts": [...]}`)
    pub const WORKOUT_DATA: &str = "fitness_workout_data";
    /// The in-progress workout, written on every mutation
    pub const ACTIVE_WORKOUT: &str = "fitness_active_workout";
    /// Health goals and entries (`{"goals": [...], "entries": [...]}`)
    pub const HEALTH_DATA: &str = "fitness_health_data";
    /// User-created exercises
    pub const CUSTOM_EXERCISES: &str = "custom_exercises";
    /// Set to `"true"` once local data has been pushed to the remote store
    pub const MIGRATED_FLAG: &str = "fitness_migrated_to_cloud";
}

/// Workout defaults
pub mod workout {
    /// Duration recorded on completion until real timing is tracked (30 minutes)
    pub const COMPLETED_DURATION_SECS: u64 = 1800;
    /// Name used when a workout is started implicitly from the exercise library
    pub const QUICK_WORKOUT_NAME: &str = "Quick Workout";
}

/// Analytics thresholds and limits
pub mod analytics {
    /// Size of each recap window in days
    pub const RECAP_WINDOW_DAYS: i64 = 7;
    /// Maximum improved exercises reported by the weekly recap
    pub const MAX_IMPROVED_EXERCISES: usize = 5;
    /// Muscle groups displayed by the weekly recap
    pub const TOP_MUSCLE_GROUPS: usize = 6;
    /// Number of exercises that receive a next-session suggestion
    pub const SUGGESTED_GOAL_COUNT: usize = 3;
    /// Weight increment for compound lifts
    pub const COMPOUND_INCREMENT: f64 = 5.0;
    /// Weight increment for everything else
    pub const ISOLATION_INCREMENT: f64 = 2.5;
    /// Lifts matched case-insensitively by name substring as compound
    pub const COMPOUND_LIFTS: &[&str] = &[
        "Bench Press",
        "Squat",
        "Deadlift",
        "Overhead Press",
        "Barbell Row",
    ];
    /// Unit label used in recap text
    pub const WEIGHT_UNIT: &str = "lbs";
}

/// Health goal tracking
pub mod health {
    /// Trailing window scanned for streaks
    pub const STREAK_WINDOW_DAYS: i64 = 30;
    /// Days per tracked week
    pub const DAYS_PER_WEEK: i64 = 7;
}

/// Service identity used in logs
pub mod service_names {
    /// Library/service name
    pub const IRONLOG: &str = "ironlog";
}
