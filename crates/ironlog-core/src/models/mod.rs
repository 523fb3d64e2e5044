// ABOUTME: Core data models for workouts, exercises, and health goals
// ABOUTME: Re-exports Exercise, Workout, WorkoutSet, HealthGoal and related structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Serialized field names are camelCase so that data written by earlier
//! browser-based versions of the tracker can be read back unchanged.
//!
//! ## Core Models
//!
//! - `Exercise`: immutable catalog entry
//! - `WorkoutSet`: one performed or planned set
//! - `WorkoutExercise`: an exercise instance inside a workout
//! - `Workout`: active, completed, or planned workout
//! - `PlannedExercise`: template entry used to pre-populate sets
//! - `HealthGoal` / `HealthEntry`: daily and weekly health tracking

mod exercise;
mod health;
mod workout;

// Exercise domain
pub use exercise::{Exercise, ExerciseType};

// Workout domain
pub use workout::{
    PlannedExercise, PlannedWorkoutUpdate, PreviousSet, SetUpdate, SetValue, Workout,
    WorkoutExercise, WorkoutSet, WorkoutState, WorkoutSummary,
};

// Health domain
pub use health::{
    DailyHealthSummary, HealthEntry, HealthEntryUpdate, HealthGoal, HealthGoalFrequency,
    HealthGoalType, HealthGoalUpdate, HealthStats, WeeklyHealthSummary,
};
