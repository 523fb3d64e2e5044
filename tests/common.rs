// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory database, clocks and workout fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `ironlog`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use ironlog::cache::InMemoryStorage;
use ironlog::clock::FixedClock;
use ironlog::database::Database;
use ironlog_core::catalog::builtin_exercises;
use ironlog_core::models::{Exercise, SetValue, Workout, WorkoutExercise, WorkoutSet};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Fresh shared in-memory cache
pub fn memory_storage() -> Arc<InMemoryStorage> {
    init_test_logging();
    Arc::new(InMemoryStorage::new())
}

/// UTC instant helper
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Clock frozen at the given UTC hour
pub fn fixed_clock(year: i32, month: u32, day: u32, hour: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(at(year, month, day, hour)))
}

/// Built-in catalog entry by name
pub fn catalog_exercise(name: &str) -> Exercise {
    builtin_exercises()
        .into_iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no catalog exercise named {name}"))
}

/// Completed set with numeric weight and reps
pub fn completed_set(exercise: &Exercise, weight: f64, reps: f64) -> WorkoutSet {
    WorkoutSet {
        weight: Some(SetValue::Number(weight)),
        reps: Some(SetValue::Number(reps)),
        completed: true,
        ..WorkoutSet::empty(exercise.id.clone())
    }
}

/// Completed workout with one exercise per `(exercise, sets)` entry
pub fn completed_workout(
    name: &str,
    date: DateTime<Utc>,
    entries: &[(&Exercise, &[(f64, f64)])],
) -> Workout {
    let mut workout = Workout::new_active(name, date);
    workout.exercises = entries
        .iter()
        .map(|(exercise, sets)| WorkoutExercise {
            sets: sets
                .iter()
                .map(|(weight, reps)| completed_set(exercise, *weight, *reps))
                .collect(),
            ..WorkoutExercise::new((*exercise).clone())
        })
        .collect();
    workout.completed = true;
    workout.duration = Some(1800);
    workout
}
