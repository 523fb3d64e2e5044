// ABOUTME: Workout, exercise instance, set and planning models
// ABOUTME: Includes partial-update structs and the derived WorkoutSummary view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Exercise;

/// A weight or rep count as entered by the user
///
/// Values typed into a set row may be pending text until the user finishes
/// entering them. Remote rows also persist weight and reps as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetValue {
    /// A parsed numeric value
    Number(f64),
    /// Raw text, possibly incomplete
    Text(String),
}

impl SetValue {
    /// Numeric interpretation of this value
    ///
    /// Text that parses as a finite number counts as numeric.
    #[must_use]
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Text form used for persistence
    #[must_use]
    pub fn to_storage_string(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Rebuild from a persisted text column
    #[must_use]
    pub fn from_storage_string(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or_else(|| Self::Text(raw.to_owned()), Self::Number)
    }
}

impl From<f64> for SetValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for SetValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for SetValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

fn numeric_or_zero(value: Option<&SetValue>) -> f64 {
    value.and_then(SetValue::numeric).unwrap_or(0.0)
}

/// One performed or planned set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    /// Set identifier
    pub id: Uuid,
    /// Catalog id of the owning exercise
    pub exercise_id: String,
    /// Weight lifted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<SetValue>,
    /// Repetitions performed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<SetValue>,
    /// Duration in seconds (non-strength types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Distance in meters (non-strength types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Whether the set was performed
    #[serde(default)]
    pub completed: bool,
}

impl WorkoutSet {
    /// A fresh set with no values entered
    #[must_use]
    pub fn empty(exercise_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.into(),
            weight: None,
            reps: None,
            duration: None,
            distance: None,
            completed: false,
        }
    }

    /// Weight as a number, 0 when absent or non-numeric
    #[must_use]
    pub fn numeric_weight(&self) -> f64 {
        numeric_or_zero(self.weight.as_ref())
    }

    /// Reps as a number, 0 when absent or non-numeric
    #[must_use]
    pub fn numeric_reps(&self) -> f64 {
        numeric_or_zero(self.reps.as_ref())
    }

    /// Both weight and reps are numeric and positive
    #[must_use]
    pub fn has_load(&self) -> bool {
        self.numeric_weight() > 0.0 && self.numeric_reps() > 0.0
    }

    /// weight × reps
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.numeric_weight() * self.numeric_reps()
    }
}

/// Partial update merged into a [`WorkoutSet`]
///
/// Outer `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUpdate {
    /// New weight
    #[serde(default)]
    pub weight: Option<Option<SetValue>>,
    /// New reps
    #[serde(default)]
    pub reps: Option<Option<SetValue>>,
    /// New duration
    #[serde(default)]
    pub duration: Option<Option<f64>>,
    /// New distance
    #[serde(default)]
    pub distance: Option<Option<f64>>,
    /// New completed flag
    #[serde(default)]
    pub completed: Option<bool>,
}

impl SetUpdate {
    /// Update only the weight
    #[must_use]
    pub fn weight(value: impl Into<SetValue>) -> Self {
        Self {
            weight: Some(Some(value.into())),
            ..Self::default()
        }
    }

    /// Update only the reps
    #[must_use]
    pub fn reps(value: impl Into<SetValue>) -> Self {
        Self {
            reps: Some(Some(value.into())),
            ..Self::default()
        }
    }

    /// Update only the completed flag
    #[must_use]
    pub fn completed(done: bool) -> Self {
        Self {
            completed: Some(done),
            ..Self::default()
        }
    }

    /// Also set the weight
    #[must_use]
    pub fn with_weight(mut self, value: impl Into<SetValue>) -> Self {
        self.weight = Some(Some(value.into()));
        self
    }

    /// Also set the reps
    #[must_use]
    pub fn with_reps(mut self, value: impl Into<SetValue>) -> Self {
        self.reps = Some(Some(value.into()));
        self
    }

    /// Also set the completed flag
    #[must_use]
    pub const fn with_completed(mut self, done: bool) -> Self {
        self.completed = Some(done);
        self
    }

    /// Merge the provided fields into `set`
    pub fn apply(&self, set: &mut WorkoutSet) {
        if let Some(weight) = &self.weight {
            set.weight.clone_from(weight);
        }
        if let Some(reps) = &self.reps {
            set.reps.clone_from(reps);
        }
        if let Some(duration) = self.duration {
            set.duration = duration;
        }
        if let Some(distance) = self.distance {
            set.distance = distance;
        }
        if let Some(completed) = self.completed {
            set.completed = completed;
        }
    }
}

/// An exercise instance inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    /// Instance identifier, distinct from the catalog id
    pub id: Uuid,
    /// The catalog entry
    pub exercise: Exercise,
    /// Ordered sets; never empty inside a store-managed workout
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutExercise {
    /// Wrap `exercise` with exactly one empty set
    #[must_use]
    pub fn new(exercise: Exercise) -> Self {
        let first_set = WorkoutSet::empty(exercise.id.clone());
        Self {
            id: Uuid::new_v4(),
            exercise,
            sets: vec![first_set],
            notes: None,
        }
    }

    /// Sets marked completed
    pub fn completed_sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.sets.iter().filter(|s| s.completed)
    }

    /// Number of completed sets
    #[must_use]
    pub fn completed_set_count(&self) -> usize {
        self.completed_sets().count()
    }

    /// Highest completed weight, 0 when nothing was completed
    #[must_use]
    pub fn max_completed_weight(&self) -> f64 {
        self.completed_sets()
            .map(WorkoutSet::numeric_weight)
            .fold(0.0, f64::max)
    }

    /// Highest completed rep count, 0 when nothing was completed
    #[must_use]
    pub fn max_completed_reps(&self) -> f64 {
        self.completed_sets()
            .map(WorkoutSet::numeric_reps)
            .fold(0.0, f64::max)
    }

    /// Sum of weight × reps over completed sets
    #[must_use]
    pub fn completed_volume(&self) -> f64 {
        self.completed_sets().map(WorkoutSet::volume).sum()
    }
}

/// Snapshot of a set from the last session, used to seed a planned workout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviousSet {
    /// Weight used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Reps performed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<f64>,
}

/// Template entry on a planned workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExercise {
    /// The catalog entry
    #[serde(flatten)]
    pub exercise: Exercise,
    /// Reference weight to aim for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_weight: Option<f64>,
    /// Reference reps to aim for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_reps: Option<f64>,
    /// Per-position snapshots of the last session
    #[serde(default)]
    pub previous_sets: Vec<PreviousSet>,
}

impl PlannedExercise {
    /// Plan an exercise with no history
    #[must_use]
    pub const fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            reference_weight: None,
            reference_reps: None,
            previous_sets: Vec::new(),
        }
    }

    /// Sets to seed when this plan is started: one per snapshot, else one empty set
    #[must_use]
    pub fn seed_sets(&self) -> Vec<WorkoutSet> {
        if self.previous_sets.is_empty() {
            return vec![WorkoutSet::empty(self.exercise.id.clone())];
        }
        self.previous_sets
            .iter()
            .map(|snapshot| WorkoutSet {
                weight: snapshot.weight.map(SetValue::Number),
                reps: snapshot.reps.map(SetValue::Number),
                ..WorkoutSet::empty(self.exercise.id.clone())
            })
            .collect()
    }
}

/// Lifecycle state of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutState {
    /// In progress, neither completed nor planned
    Active,
    /// Historical record
    Completed,
    /// Future template
    Planned,
}

/// A workout: active, completed, or planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Workout identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Ordered exercise instances
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
    /// When the workout happened or is scheduled
    pub date: DateTime<Utc>,
    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Historical record flag
    #[serde(default)]
    pub completed: bool,
    /// Future template flag
    #[serde(default)]
    pub planned: bool,
    /// Template entries (planned workouts only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub planned_exercises: Vec<PlannedExercise>,
}

impl Workout {
    /// A new in-progress workout with no exercises
    #[must_use]
    pub fn new_active(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            exercises: Vec::new(),
            date,
            duration: None,
            notes: None,
            completed: false,
            planned: false,
            planned_exercises: Vec::new(),
        }
    }

    /// A new planned template with no exercises
    #[must_use]
    pub fn new_planned(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            planned: true,
            ..Self::new_active(name, date)
        }
    }

    /// Lifecycle state derived from the flags
    #[must_use]
    pub const fn state(&self) -> WorkoutState {
        if self.completed {
            WorkoutState::Completed
        } else if self.planned {
            WorkoutState::Planned
        } else {
            WorkoutState::Active
        }
    }

    /// First exercise instance with the given instance id
    #[must_use]
    pub fn exercise(&self, exercise_id: Uuid) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    /// Mutable exercise instance lookup
    pub fn exercise_mut(&mut self, exercise_id: Uuid) -> Option<&mut WorkoutExercise> {
        self.exercises.iter_mut().find(|e| e.id == exercise_id)
    }

    /// First exercise instance whose catalog name equals `name`
    #[must_use]
    pub fn exercise_by_name(&self, name: &str) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.exercise.name == name)
    }

    /// Sum of completed-set volume across all exercises
    #[must_use]
    pub fn completed_volume(&self) -> f64 {
        self.exercises
            .iter()
            .map(WorkoutExercise::completed_volume)
            .sum()
    }

    /// Number of completed sets across all exercises
    #[must_use]
    pub fn completed_set_count(&self) -> usize {
        self.exercises
            .iter()
            .map(WorkoutExercise::completed_set_count)
            .sum()
    }
}

/// Partial update for a planned workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedWorkoutUpdate {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New scheduled date
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// New notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Replacement template entries
    #[serde(default)]
    pub planned_exercises: Option<Vec<PlannedExercise>>,
}

impl PlannedWorkoutUpdate {
    /// Merge into `workout`
    pub fn apply(&self, workout: &mut Workout) {
        if let Some(name) = &self.name {
            workout.name.clone_from(name);
        }
        if let Some(date) = self.date {
            workout.date = date;
        }
        if let Some(notes) = &self.notes {
            workout.notes = Some(notes.clone());
        }
        if let Some(planned) = &self.planned_exercises {
            workout.planned_exercises.clone_from(planned);
        }
    }
}

/// Aggregate statistics over the workout history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    /// Completed workouts
    pub total_workouts: usize,
    /// Completed workouts since the start of the current week
    pub this_week_workouts: usize,
    /// Sum of completed workout durations in seconds
    pub total_duration: u64,
    /// Most frequent exercise name across all workouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_exercise: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseType;

    fn bench() -> Exercise {
        Exercise::new("1", "Bench Press", ExerciseType::Strength, &["chest"])
    }

    #[test]
    fn test_set_value_numeric_parsing() {
        assert_eq!(SetValue::Number(135.0).numeric(), Some(135.0));
        assert_eq!(SetValue::from(" 42.5 ").numeric(), Some(42.5));
        assert_eq!(SetValue::from("12x").numeric(), None);
        assert_eq!(SetValue::Number(f64::NAN).numeric(), None);
    }

    #[test]
    fn test_set_value_untagged_serde() {
        let number: SetValue = serde_json::from_str("135").unwrap();
        let text: SetValue = serde_json::from_str("\"13\"").unwrap();
        assert_eq!(number, SetValue::Number(135.0));
        assert_eq!(text, SetValue::Text("13".to_owned()));
    }

    #[test]
    fn test_new_workout_exercise_has_one_empty_set() {
        let instance = WorkoutExercise::new(bench());
        assert_eq!(instance.sets.len(), 1);
        assert_eq!(instance.sets[0].exercise_id, "1");
        assert!(instance.sets[0].weight.is_none());
        assert!(!instance.sets[0].completed);
    }

    #[test]
    fn test_max_and_volume_only_count_completed_sets() {
        let mut instance = WorkoutExercise::new(bench());
        SetUpdate::weight(135.0)
            .with_reps(8_u32)
            .with_completed(true)
            .apply(&mut instance.sets[0]);
        let mut heavy = WorkoutSet::empty("1");
        SetUpdate::weight(200.0).with_reps(1_u32).apply(&mut heavy);
        instance.sets.push(heavy);

        assert_eq!(instance.max_completed_weight(), 135.0);
        assert_eq!(instance.max_completed_reps(), 8.0);
        assert_eq!(instance.completed_volume(), 1080.0);
        assert_eq!(instance.completed_set_count(), 1);
    }

    #[test]
    fn test_set_update_can_clear_field() {
        let mut set = WorkoutSet::empty("1");
        SetUpdate::weight(100.0).apply(&mut set);
        let clear = SetUpdate {
            weight: Some(None),
            ..SetUpdate::default()
        };
        clear.apply(&mut set);
        assert!(set.weight.is_none());
    }

    #[test]
    fn test_seed_sets_from_previous_snapshots() {
        let mut planned = PlannedExercise::new(bench());
        assert_eq!(planned.seed_sets().len(), 1);

        planned.previous_sets = vec![
            PreviousSet {
                weight: Some(135.0),
                reps: Some(8.0),
            },
            PreviousSet {
                weight: Some(145.0),
                reps: Some(6.0),
            },
        ];
        let seeded = planned.seed_sets();
        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded[1].numeric_weight(), 145.0);
        assert!(seeded.iter().all(|s| !s.completed));
    }

    #[test]
    fn test_legacy_camel_case_workout_parses() {
        let raw = r#"{
            "id": "6f1c2a8e-0b5e-4c4f-9d55-3a1f1f0e2c11",
            "name": "Push Day",
            "date": "2025-03-02T18:30:00.000Z",
            "completed": true,
            "duration": 1800,
            "exercises": [{
                "id": "1e7d4a55-8c2b-4f3e-a1a0-9b8f7e6d5c4b",
                "exercise": {"id": "1", "name": "Bench Press", "type": "strength", "muscleGroups": ["chest"]},
                "sets": [{"id": "0d6f0a51-2a0c-4c1b-8f7e-5e4d3c2b1a09", "exerciseId": "1", "weight": 135, "reps": "8", "completed": true}]
            }]
        }"#;
        let workout: Workout = serde_json::from_str(raw).unwrap();
        assert_eq!(workout.state(), WorkoutState::Completed);
        assert_eq!(workout.completed_volume(), 1080.0);
    }
}
