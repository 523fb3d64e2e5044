// ABOUTME: Workout history summary cached by the workout store
// ABOUTME: Totals, this-week count, total duration and favorite exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::aggregation::OrderedTally;
use crate::time::start_of_week;
use chrono::{DateTime, FixedOffset};
use ironlog_core::models::{Workout, WorkoutSummary};

/// Summarize `workouts` as of `now`
///
/// The week starts on Sunday at local midnight. The favorite exercise is
/// counted across every workout, completed or not, and ties go to the name
/// seen first.
#[must_use]
pub fn compute_summary(workouts: &[Workout], now: DateTime<FixedOffset>) -> WorkoutSummary {
    let week_start = start_of_week(now);
    let completed = || workouts.iter().filter(|w| w.completed);

    let mut frequency: OrderedTally<usize> = OrderedTally::default();
    for instance in workouts.iter().flat_map(|w| &w.exercises) {
        *frequency.entry(&instance.exercise.name) += 1;
    }
    let mut favorite: Option<(&str, usize)> = None;
    for (name, count) in frequency.iter() {
        match favorite {
            Some((_, best)) if *count <= best => {}
            _ => favorite = Some((name, *count)),
        }
    }

    WorkoutSummary {
        total_workouts: completed().count(),
        this_week_workouts: completed().filter(|w| w.date >= week_start).count(),
        total_duration: completed().filter_map(|w| w.duration).sum(),
        favorite_exercise: favorite.map(|(name, _)| name.to_owned()),
    }
}
