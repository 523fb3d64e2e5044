// ABOUTME: Benchmark fixtures generating deterministic workout histories
// ABOUTME: Workouts cycle through catalog exercises with slowly increasing loads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for workout history.
//!
//! Generation is deterministic so runs stay comparable.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use ironlog_core::catalog::builtin_exercises;
use ironlog_core::models::{SetValue, Workout, WorkoutExercise, WorkoutSet};

/// Predefined history sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum WorkoutBatchSize {
    /// A few weeks of training
    Small,
    /// About a year at two sessions a week
    Medium,
    /// Several years of daily logging
    Large,
}

impl WorkoutBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 100,
            Self::Large => 1_000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "10",
            Self::Medium => "100",
            Self::Large => "1000",
        }
    }
}

/// Fixed "now" for every benchmark: a Wednesday evening at UTC
#[must_use]
pub fn bench_now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2025, 3, 12, 18, 0, 0)
        .single()
        .unwrap_or_default()
        .fixed_offset()
}

/// `count` completed workouts, newest first, one per day back from [`bench_now`]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
#[must_use]
pub fn generate_workouts(count: usize) -> Vec<Workout> {
    let catalog = builtin_exercises();
    let now = bench_now().with_timezone(&Utc);
    (0..count)
        .map(|index| {
            let date = now - Duration::days(index as i64);
            let mut workout = Workout::new_active(format!("Session {index}"), date);
            workout.exercises = (0..4)
                .map(|slot| {
                    let exercise = catalog[(index + slot * 5) % catalog.len()].clone();
                    let base = 45.0 + ((count - index) as f64) * 2.5;
                    WorkoutExercise {
                        sets: (0..3)
                            .map(|set| WorkoutSet {
                                weight: Some(SetValue::Number(base + f64::from(set) * 10.0)),
                                reps: Some(SetValue::Number(f64::from(10 - set * 2))),
                                completed: true,
                                ..WorkoutSet::empty(exercise.id.clone())
                            })
                            .collect(),
                        ..WorkoutExercise::new(exercise)
                    }
                })
                .collect();
            workout.completed = true;
            workout.duration = Some(1800);
            workout
        })
        .collect()
}
