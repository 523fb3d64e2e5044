// ABOUTME: Workout state store owning the active workout and the workout history
// ABOUTME: All workout mutations go through here; invalid preconditions are silent no-ops
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout State Store
//!
//! Holds at most one active workout plus the history of completed and planned
//! workouts. Mutations update local state immediately, write the active workout
//! to the local cache, and then either rewrite the local history document
//! (local-only mode) or dispatch a remote write (remote mode).
//!
//! Mutations whose precondition does not hold are ignored and logged at
//! `debug`. They never return an error.

use crate::cache::{load_json, save_json, LocalStorage};
use crate::clock::Clock;
use crate::database::repositories::WorkoutRepository;
use crate::errors::{AppError, AppResult};
use crate::sync::{SyncHandle, SyncOperation};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use ironlog_core::constants::{storage_keys, workout as workout_defaults};
use ironlog_core::models::{
    Exercise, PlannedExercise, PlannedWorkoutUpdate, PreviousSet, SetUpdate, SetValue, Workout,
    WorkoutExercise, WorkoutSet, WorkoutSummary,
};
use ironlog_intelligence::compute_summary;
use ironlog_intelligence::time::local_date;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Local-only workout history document (`fitness_workout_data`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalWorkoutData {
    /// Completed and planned workouts
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

/// Where history changes are persisted
#[derive(Debug, Clone)]
enum Persistence {
    Local,
    Remote(SyncHandle),
}

/// Single source of truth for workout state
pub struct WorkoutStore {
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    persistence: Persistence,
    active: Option<Workout>,
    workouts: Vec<Workout>,
    summary: WorkoutSummary,
}

impl WorkoutStore {
    /// Open in local-only mode, restoring history and the active workout from `storage`
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read or decoded
    pub fn open_local(storage: Arc<dyn LocalStorage>, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let data: LocalWorkoutData =
            load_json(storage.as_ref(), storage_keys::WORKOUT_DATA)?.unwrap_or_default();
        info!(workouts = data.workouts.len(), "Loaded local workout history");
        Ok(Self::with_history(storage, clock, Persistence::Local, data.workouts))
    }

    /// Open in remote mode, loading history for `user_id` from `repository`
    ///
    /// # Errors
    ///
    /// Returns an error if the remote history cannot be loaded
    pub async fn open_remote(
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        repository: &dyn WorkoutRepository,
        user_id: Uuid,
        sync: SyncHandle,
    ) -> AppResult<Self> {
        let workouts = repository
            .list_workouts(user_id)
            .await
            .map_err(AppError::from)?;
        info!(workouts = workouts.len(), %user_id, "Loaded remote workout history");
        Ok(Self::with_history(
            storage,
            clock,
            Persistence::Remote(sync),
            workouts,
        ))
    }

    fn with_history(
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        persistence: Persistence,
        workouts: Vec<Workout>,
    ) -> Self {
        let active = restore_active(storage.as_ref());
        let summary = compute_summary(&workouts, clock.now());
        Self {
            storage,
            clock,
            persistence,
            active,
            workouts,
            summary,
        }
    }

    // ------------------------------------------------------------------
    // Read views
    // ------------------------------------------------------------------

    /// The in-progress workout
    #[must_use]
    pub const fn active_workout(&self) -> Option<&Workout> {
        self.active.as_ref()
    }

    /// Completed and planned workouts in insertion order
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Summary recomputed on every history change
    #[must_use]
    pub const fn summary(&self) -> &WorkoutSummary {
        &self.summary
    }

    /// Historical workout by id
    #[must_use]
    pub fn get_workout(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// History workouts whose date falls on the local calendar day `date`
    #[must_use]
    pub fn get_workouts_by_date(&self, date: NaiveDate) -> Vec<&Workout> {
        let offset = self.clock.offset();
        self.workouts
            .iter()
            .filter(|w| local_date(w.date, offset) == date)
            .collect()
    }

    /// Completed workouts containing catalog exercise `exercise_id`, newest first
    #[must_use]
    pub fn exercise_history(&self, exercise_id: &str) -> Vec<(&Workout, &WorkoutExercise)> {
        let mut history: Vec<(&Workout, &WorkoutExercise)> = self
            .workouts
            .iter()
            .filter(|w| w.completed)
            .filter_map(|w| {
                w.exercises
                    .iter()
                    .find(|e| e.exercise.id == exercise_id)
                    .map(|e| (w, e))
            })
            .collect();
        history.sort_by_key(|(w, _)| Reverse(w.date));
        history
    }

    /// Planned workouts dated within the local days `start..=end`, by date
    #[must_use]
    pub fn planned_workouts_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Workout> {
        let offset = self.clock.offset();
        let mut planned: Vec<&Workout> = self
            .workouts
            .iter()
            .filter(|w| w.planned)
            .filter(|w| {
                let day = local_date(w.date, offset);
                day >= start && day <= end
            })
            .collect();
        planned.sort_by_key(|w| w.date);
        planned
    }

    /// Planned workouts for the seven local days beginning `week_start`
    #[must_use]
    pub fn planned_workouts_for_week(&self, week_start: NaiveDate) -> Vec<&Workout> {
        self.planned_workouts_between(week_start, week_start + Duration::days(6))
    }

    /// Plan `exercise`, seeding it from the most recent completed workout that has it
    #[must_use]
    pub fn plan_exercise(&self, exercise: Exercise) -> PlannedExercise {
        let latest = self
            .workouts
            .iter()
            .filter(|w| w.completed)
            .filter_map(|w| w.exercise_by_name(&exercise.name).map(|e| (w.date, e)))
            .max_by_key(|(date, _)| *date)
            .map(|(_, instance)| instance);

        let Some(instance) = latest else {
            return PlannedExercise::new(exercise);
        };

        let previous_sets = instance
            .sets
            .iter()
            .map(|set| PreviousSet {
                weight: set.weight.as_ref().and_then(SetValue::numeric),
                reps: set.reps.as_ref().and_then(SetValue::numeric),
            })
            .collect();
        let max_weight = instance.max_completed_weight();
        let max_reps = instance.max_completed_reps();

        PlannedExercise {
            exercise,
            reference_weight: (max_weight > 0.0).then_some(max_weight),
            reference_reps: (max_reps > 0.0).then_some(max_reps),
            previous_sets,
        }
    }

    // ------------------------------------------------------------------
    // Active workout mutations
    // ------------------------------------------------------------------

    /// Start a new active workout, displacing any unsaved one
    pub fn start_workout(&mut self, name: impl Into<String>) -> Uuid {
        let workout = Workout::new_active(name, self.clock.now_utc());
        let id = workout.id;
        if let Some(previous) = self.active.replace(workout) {
            debug!(discarded = %previous.id, "Discarded unsaved active workout");
        }
        info!(workout_id = %id, "Started workout");
        self.persist_active();
        id
    }

    /// Append `exercise` with one empty set; returns the new instance id
    pub fn add_exercise_to_workout(&mut self, exercise: Exercise) -> Option<Uuid> {
        let Some(active) = self.active.as_mut() else {
            debug!("add_exercise_to_workout ignored: no active workout");
            return None;
        };
        let instance = WorkoutExercise::new(exercise);
        let id = instance.id;
        active.exercises.push(instance);
        self.persist_active();
        Some(id)
    }

    /// Remove an exercise instance from the active workout
    pub fn remove_exercise_from_workout(&mut self, exercise_id: Uuid) {
        let Some(active) = self.active.as_mut() else {
            debug!("remove_exercise_from_workout ignored: no active workout");
            return;
        };
        active.exercises.retain(|e| e.id != exercise_id);
        self.persist_active();
    }

    /// Append an empty set; returns the new set id
    pub fn add_set_to_exercise(&mut self, exercise_id: Uuid) -> Option<Uuid> {
        let instance = self.active_exercise_mut(exercise_id)?;
        let set = WorkoutSet::empty(instance.exercise.id.clone());
        let id = set.id;
        instance.sets.push(set);
        self.persist_active();
        Some(id)
    }

    /// Append a copy of the last set's weight and reps, not completed
    pub fn duplicate_last_set(&mut self, exercise_id: Uuid) -> Option<Uuid> {
        let instance = self.active_exercise_mut(exercise_id)?;
        let Some(last) = instance.sets.last() else {
            debug!(%exercise_id, "duplicate_last_set ignored: no sets");
            return None;
        };
        let set = WorkoutSet {
            weight: last.weight.clone(),
            reps: last.reps.clone(),
            ..WorkoutSet::empty(instance.exercise.id.clone())
        };
        let id = set.id;
        instance.sets.push(set);
        self.persist_active();
        Some(id)
    }

    /// Remove a set unless it is the only one left
    pub fn remove_set_from_exercise(&mut self, exercise_id: Uuid, set_id: Uuid) {
        let Some(instance) = self.active_exercise_mut(exercise_id) else {
            return;
        };
        if instance.sets.len() <= 1 {
            debug!(%exercise_id, "remove_set_from_exercise ignored: last remaining set");
            return;
        }
        instance.sets.retain(|s| s.id != set_id);
        self.persist_active();
    }

    /// Merge `update` into one set
    pub fn update_set(&mut self, exercise_id: Uuid, set_id: Uuid, update: &SetUpdate) {
        let Some(instance) = self.active_exercise_mut(exercise_id) else {
            return;
        };
        let Some(set) = instance.sets.iter_mut().find(|s| s.id == set_id) else {
            debug!(%set_id, "update_set ignored: unknown set");
            return;
        };
        update.apply(set);
        self.persist_active();
    }

    /// Replace an exercise's sets with `sets` in the given order
    ///
    /// An empty sequence is ignored so every exercise keeps at least one set.
    pub fn reorder_sets(&mut self, exercise_id: Uuid, sets: Vec<WorkoutSet>) {
        if sets.is_empty() {
            debug!(%exercise_id, "reorder_sets ignored: empty set list");
            return;
        }
        let Some(instance) = self.active_exercise_mut(exercise_id) else {
            return;
        };
        instance.sets = sets;
        self.persist_active();
    }

    /// Replace the active workout's exercises with `exercises` in the given order
    pub fn reorder_exercises(&mut self, exercises: Vec<WorkoutExercise>) {
        let Some(active) = self.active.as_mut() else {
            debug!("reorder_exercises ignored: no active workout");
            return;
        };
        active.exercises = exercises;
        self.persist_active();
    }

    /// Set the notes of every exercise instance with this id, active or historical
    ///
    /// Blank notes clear the field.
    pub fn update_exercise_notes(&mut self, exercise_id: Uuid, notes: &str) {
        let notes = Some(notes.trim().to_owned()).filter(|n| !n.is_empty());

        let mut active_changed = false;
        if let Some(instance) = self
            .active
            .as_mut()
            .and_then(|w| w.exercise_mut(exercise_id))
        {
            instance.notes.clone_from(&notes);
            active_changed = true;
        }

        let mut history_changed = false;
        for workout in &mut self.workouts {
            for instance in workout.exercises.iter_mut().filter(|e| e.id == exercise_id) {
                instance.notes.clone_from(&notes);
                history_changed = true;
            }
        }

        if !active_changed && !history_changed {
            debug!(%exercise_id, "update_exercise_notes ignored: unknown exercise");
            return;
        }
        if active_changed {
            self.persist_active();
        }
        if history_changed {
            match &self.persistence {
                Persistence::Local => self.persist_local_history(),
                Persistence::Remote(sync) => sync.dispatch(SyncOperation::UpdateExerciseNotes {
                    workout_exercise_id: exercise_id,
                    notes,
                }),
            }
        }
    }

    /// Move the active workout into history as completed
    ///
    /// Any set with numeric weight and reps above zero is marked completed.
    pub fn complete_workout(&mut self) -> Option<Uuid> {
        let Some(mut workout) = self.active.take() else {
            debug!("complete_workout ignored: no active workout");
            return None;
        };
        for set in workout.exercises.iter_mut().flat_map(|e| e.sets.iter_mut()) {
            if set.has_load() {
                set.completed = true;
            }
        }
        workout.completed = true;
        workout.planned = false;
        workout.duration = Some(workout_defaults::COMPLETED_DURATION_SECS);

        let id = workout.id;
        info!(
            workout_id = %id,
            sets = workout.completed_set_count(),
            volume = workout.completed_volume(),
            "Completed workout"
        );
        self.persist_active();
        self.insert_history(workout);
        Some(id)
    }

    /// Discard the active workout
    pub fn cancel_workout(&mut self) {
        if let Some(discarded) = self.active.take() {
            info!(workout_id = %discarded.id, "Canceled workout");
        }
        self.persist_active();
    }

    // ------------------------------------------------------------------
    // Planning
    // ------------------------------------------------------------------

    /// Create and persist an empty planned workout
    pub fn create_planned_workout(
        &mut self,
        name: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Uuid {
        let workout = Workout::new_planned(name, date);
        let id = workout.id;
        info!(workout_id = %id, %date, "Planned workout");
        self.insert_history(workout);
        id
    }

    /// Merge `update` into a planned workout
    pub fn update_planned_workout(&mut self, id: Uuid, update: &PlannedWorkoutUpdate) {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id == id && w.planned) else {
            debug!(workout_id = %id, "update_planned_workout ignored: unknown plan");
            return;
        };
        update.apply(workout);
        let saved = workout.clone();
        self.history_changed(Some(saved));
    }

    /// Permanently remove a planned workout
    pub fn delete_planned_workout(&mut self, id: Uuid) {
        let before = self.workouts.len();
        self.workouts.retain(|w| !(w.id == id && w.planned));
        if self.workouts.len() == before {
            debug!(workout_id = %id, "delete_planned_workout ignored: unknown plan");
            return;
        }
        info!(workout_id = %id, "Deleted planned workout");
        self.recompute_summary();
        match &self.persistence {
            Persistence::Local => self.persist_local_history(),
            Persistence::Remote(sync) => sync.dispatch(SyncOperation::DeleteWorkout(id)),
        }
    }

    /// Materialize a planned workout as the new active workout
    ///
    /// Fresh ids are generated for the workout, its exercises and sets. Each
    /// planned exercise seeds one set per previous-set snapshot, or one empty
    /// set. The plan itself stays in history.
    pub fn start_planned_workout(&mut self, planned_id: Uuid) -> Option<Uuid> {
        let Some(plan) = self.workouts.iter().find(|w| w.id == planned_id && w.planned) else {
            debug!(workout_id = %planned_id, "start_planned_workout ignored: unknown plan");
            return None;
        };
        if plan.planned_exercises.is_empty() {
            debug!(workout_id = %planned_id, "start_planned_workout ignored: plan has no exercises");
            return None;
        }

        let mut workout = Workout::new_active(plan.name.clone(), self.clock.now_utc());
        workout.notes.clone_from(&plan.notes);
        workout.exercises = plan
            .planned_exercises
            .iter()
            .map(|planned| WorkoutExercise {
                sets: planned.seed_sets(),
                ..WorkoutExercise::new(planned.exercise.clone())
            })
            .collect();

        let id = workout.id;
        if let Some(previous) = self.active.replace(workout) {
            debug!(discarded = %previous.id, "Discarded unsaved active workout");
        }
        info!(workout_id = %id, plan_id = %planned_id, "Started planned workout");
        self.persist_active();
        Some(id)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn active_exercise_mut(&mut self, exercise_id: Uuid) -> Option<&mut WorkoutExercise> {
        let Some(active) = self.active.as_mut() else {
            debug!("Set mutation ignored: no active workout");
            return None;
        };
        let instance = active.exercise_mut(exercise_id);
        if instance.is_none() {
            debug!(%exercise_id, "Set mutation ignored: exercise not in active workout");
        }
        instance
    }

    fn insert_history(&mut self, workout: Workout) {
        self.workouts.push(workout.clone());
        self.history_changed(Some(workout));
    }

    fn history_changed(&mut self, saved: Option<Workout>) {
        self.recompute_summary();
        match &self.persistence {
            Persistence::Local => self.persist_local_history(),
            Persistence::Remote(sync) => {
                if let Some(workout) = saved {
                    sync.dispatch(SyncOperation::SaveWorkout(Box::new(workout)));
                }
            }
        }
    }

    fn recompute_summary(&mut self) {
        self.summary = compute_summary(&self.workouts, self.clock.now());
    }

    fn persist_active(&self) {
        let result = match &self.active {
            Some(workout) => save_json(self.storage.as_ref(), storage_keys::ACTIVE_WORKOUT, workout),
            None => self.storage.remove(storage_keys::ACTIVE_WORKOUT),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist active workout");
        }
    }

    fn persist_local_history(&self) {
        let data = LocalWorkoutDataRef {
            workouts: &self.workouts,
        };
        if let Err(e) = save_json(self.storage.as_ref(), storage_keys::WORKOUT_DATA, &data) {
            warn!(error = %e, "Failed to persist workout history");
        }
    }
}

impl std::fmt::Debug for WorkoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutStore")
            .field("persistence", &self.persistence)
            .field("active", &self.active.as_ref().map(|w| w.id))
            .field("workouts", &self.workouts.len())
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct LocalWorkoutDataRef<'a> {
    workouts: &'a [Workout],
}

/// Read the cached active workout, ignoring anything that is not an active workout
fn restore_active(storage: &dyn LocalStorage) -> Option<Workout> {
    match load_json::<Workout>(storage, storage_keys::ACTIVE_WORKOUT) {
        Ok(Some(workout)) if !workout.completed && !workout.planned => {
            info!(workout_id = %workout.id, "Restored active workout");
            Some(workout)
        }
        Ok(Some(workout)) => {
            warn!(workout_id = %workout.id, "Cached active workout is not active, ignoring");
            None
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Failed to restore active workout");
            None
        }
    }
}
