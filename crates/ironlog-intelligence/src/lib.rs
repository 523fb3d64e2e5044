// ABOUTME: Analytics engine for Ironlog: recaps, progress streaks and health summaries
// ABOUTME: Pure functions over read-only workout and health snapshots plus a reference time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog Intelligence
//!
//! Stateless aggregation over workout history. Every function takes its inputs
//! by reference and allocates fresh output; nothing here mutates a snapshot or
//! reads the system clock.

/// Shared aggregation helpers (percent change, encounter-ordered tallies)
pub mod aggregation;

/// Local calendar boundaries (midnight, Sunday week start)
pub mod time;

/// Two-window weekly recap
pub mod weekly_recap;

/// Single-workout comparison, personal records, streaks and next-session goals
pub mod workout_recap;

/// Workout history summary
pub mod summary;

/// Health goal completion summaries and streaks
pub mod health;

pub use health::{daily_summary, health_stats, weekly_summary};
pub use summary::compute_summary;
pub use weekly_recap::{weekly_recap, ExerciseProgress, ImprovementType, MuscleGroupStats, WeeklyRecap};
pub use workout_recap::{
    progress_streak, workout_recap, ExerciseComparison, PersonalRecord, ProgressStatus,
    ProgressStreak, RecordKind, SessionGoal, WorkoutRecap, WorkoutTotals,
};
