// ABOUTME: Weekly recap comparing the trailing seven days with the seven days before
// ABOUTME: Muscle-group set deltas, per-exercise max weight/reps progress and volume change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::aggregation::{percent_change, OrderedTally};
use crate::time::midnight_days_before;
use chrono::{DateTime, FixedOffset, Utc};
use ironlog_core::constants::analytics::{
    MAX_IMPROVED_EXERCISES, RECAP_WINDOW_DAYS, TOP_MUSCLE_GROUPS,
};
use ironlog_core::models::Workout;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Completed-set counts for one muscle group across both windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroupStats {
    /// Muscle group tag
    pub name: String,
    /// Completed sets this week
    pub current_sets: usize,
    /// Completed sets last week
    pub previous_sets: usize,
    /// `current_sets - previous_sets`
    pub change: i64,
    /// Rounded percent change
    pub change_percent: i64,
}

/// Which measure improved week over week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementType {
    /// Heavier max weight only
    Weight,
    /// More max reps only
    Reps,
    /// Both
    Both,
    /// Neither
    None,
}

/// Per-exercise maxima across both windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    /// Exercise name
    pub name: String,
    /// Max completed weight this week
    pub current_max_weight: f64,
    /// Max completed weight last week
    pub previous_max_weight: f64,
    /// Max completed reps this week
    pub current_max_reps: f64,
    /// Max completed reps last week
    pub previous_max_reps: f64,
    /// Whether either measure improved
    pub improved: bool,
    /// Which measure improved
    pub improvement_type: ImprovementType,
}

/// Two-window comparison of training output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRecap {
    /// Start of the current window
    pub this_week_start: DateTime<Utc>,
    /// Start of the previous window
    pub last_week_start: DateTime<Utc>,
    /// Completed workouts in the current window
    pub this_week_workouts: usize,
    /// Completed workouts in the previous window
    pub last_week_workouts: usize,
    /// Sum of weight × reps over completed sets this week
    pub this_week_volume: f64,
    /// Same for last week
    pub last_week_volume: f64,
    /// Rounded percent change in volume
    pub volume_change_percent: i64,
    /// Improved exercises in encounter order, capped
    pub improved_exercises: Vec<ExerciseProgress>,
    /// Improved exercises before capping
    pub progress_count: usize,
    /// Exercises with any non-zero max weight in either window
    pub total_exercises: usize,
    /// All muscle groups sorted by current-week sets, descending
    pub muscle_groups: Vec<MuscleGroupStats>,
}

impl WeeklyRecap {
    /// The muscle groups worth displaying
    #[must_use]
    pub fn top_muscle_groups(&self) -> &[MuscleGroupStats] {
        let end = self.muscle_groups.len().min(TOP_MUSCLE_GROUPS);
        &self.muscle_groups[..end]
    }

    /// No completed workouts in either window
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.this_week_workouts == 0 && self.last_week_workouts == 0
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct WindowPair<T> {
    current: T,
    previous: T,
}

#[derive(Debug, Default, Clone, Copy)]
struct Maxima {
    weight: f64,
    reps: f64,
}

#[derive(Clone, Copy)]
enum Window {
    Current,
    Previous,
}

impl<T> WindowPair<T> {
    fn get_mut(&mut self, window: Window) -> &mut T {
        match window {
            Window::Current => &mut self.current,
            Window::Previous => &mut self.previous,
        }
    }
}

/// Compute the weekly recap as of `now`
///
/// The current window runs from local midnight seven days ago through `now`
/// inclusive; the previous window covers the seven days before that.
#[must_use]
pub fn weekly_recap(workouts: &[Workout], now: DateTime<FixedOffset>) -> WeeklyRecap {
    let this_week_start = midnight_days_before(now, RECAP_WINDOW_DAYS);
    let last_week_start = midnight_days_before(now, RECAP_WINDOW_DAYS * 2);
    let now_utc = now.with_timezone(&Utc);

    let this_week: Vec<&Workout> = workouts
        .iter()
        .filter(|w| w.completed && w.date >= this_week_start && w.date <= now_utc)
        .collect();
    let last_week: Vec<&Workout> = workouts
        .iter()
        .filter(|w| w.completed && w.date >= last_week_start && w.date < this_week_start)
        .collect();

    debug!(
        this_week = this_week.len(),
        last_week = last_week.len(),
        "Computing weekly recap"
    );

    let mut muscle_sets: OrderedTally<WindowPair<usize>> = OrderedTally::default();
    let mut exercise_maxima: OrderedTally<WindowPair<Maxima>> = OrderedTally::default();
    let mut volume = WindowPair::<f64>::default();

    for (window, list) in [(Window::Current, &this_week), (Window::Previous, &last_week)] {
        for workout in list {
            *volume.get_mut(window) += workout.completed_volume();
            for instance in &workout.exercises {
                let completed = instance.completed_set_count();
                for group in &instance.exercise.muscle_groups {
                    *muscle_sets.entry(group).get_mut(window) += completed;
                }
                let maxima = exercise_maxima.entry(&instance.exercise.name).get_mut(window);
                maxima.weight = maxima.weight.max(instance.max_completed_weight());
                maxima.reps = maxima.reps.max(instance.max_completed_reps());
            }
        }
    }

    let mut muscle_groups: Vec<MuscleGroupStats> = muscle_sets
        .into_entries()
        .into_iter()
        .map(|(name, sets)| MuscleGroupStats {
            name,
            current_sets: sets.current,
            previous_sets: sets.previous,
            change: sets.current as i64 - sets.previous as i64,
            change_percent: percent_change(sets.current as f64, sets.previous as f64),
        })
        .collect();
    // stable: ties keep encounter order
    muscle_groups.sort_by(|a, b| b.current_sets.cmp(&a.current_sets));

    let tracked: Vec<ExerciseProgress> = exercise_maxima
        .into_entries()
        .into_iter()
        .filter(|(_, m)| m.current.weight > 0.0 || m.previous.weight > 0.0)
        .map(|(name, m)| exercise_progress(name, m))
        .collect();
    let total_exercises = tracked.len();
    let improved: Vec<ExerciseProgress> = tracked.into_iter().filter(|e| e.improved).collect();
    let progress_count = improved.len();

    WeeklyRecap {
        this_week_start,
        last_week_start,
        this_week_workouts: this_week.len(),
        last_week_workouts: last_week.len(),
        this_week_volume: volume.current,
        last_week_volume: volume.previous,
        volume_change_percent: percent_change(volume.current, volume.previous),
        improved_exercises: improved.into_iter().take(MAX_IMPROVED_EXERCISES).collect(),
        progress_count,
        total_exercises,
        muscle_groups,
    }
}

fn exercise_progress(name: String, maxima: WindowPair<Maxima>) -> ExerciseProgress {
    let WindowPair { current, previous } = maxima;
    let weight_improved = previous.weight > 0.0 && current.weight > previous.weight;
    let reps_improved = previous.reps > 0.0 && current.reps > previous.reps;
    let improvement_type = match (weight_improved, reps_improved) {
        (true, true) => ImprovementType::Both,
        (true, false) => ImprovementType::Weight,
        (false, true) => ImprovementType::Reps,
        (false, false) => ImprovementType::None,
    };
    ExerciseProgress {
        name,
        current_max_weight: current.weight,
        previous_max_weight: previous.weight,
        current_max_reps: current.reps,
        previous_max_reps: previous.reps,
        improved: weight_improved || reps_improved,
        improvement_type,
    }
}
