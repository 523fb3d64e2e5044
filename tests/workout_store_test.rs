// ABOUTME: Integration tests for the workout state store in local-only mode
// ABOUTME: Covers the active workout lifecycle, persistence, history lookups and planning seeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{Duration, FixedOffset, NaiveDate};
use common::{at, catalog_exercise, completed_workout, fixed_clock, memory_storage};
use ironlog::cache::{save_json, LocalStorage};
use ironlog::clock::FixedClock;
use ironlog::store::{LocalWorkoutData, WorkoutStore};
use ironlog_core::constants::storage_keys;
use ironlog_core::models::{SetUpdate, SetValue, Workout};
use std::sync::Arc;

#[test]
fn test_complete_workout_moves_active_into_history() -> Result<()> {
    let storage = memory_storage();
    let clock = fixed_clock(2025, 3, 12, 18);
    let mut store = WorkoutStore::open_local(storage.clone(), clock.clone())?;

    let workout_id = store.start_workout("Push Day");
    let bench = catalog_exercise("Bench Press");
    let exercise_id = store.add_exercise_to_workout(bench).unwrap();
    let first_set = store.active_workout().unwrap().exercises[0].sets[0].id;
    store.update_set(
        exercise_id,
        first_set,
        &SetUpdate::weight(135.0).with_reps(10_u32),
    );
    let pending_set = store.add_set_to_exercise(exercise_id).unwrap();
    store.update_set(exercise_id, pending_set, &SetUpdate::weight("1"));
    assert!(storage.get(storage_keys::ACTIVE_WORKOUT)?.is_some());

    assert_eq!(store.complete_workout(), Some(workout_id));
    assert!(store.active_workout().is_none());
    assert!(storage.get(storage_keys::ACTIVE_WORKOUT)?.is_none());

    let saved = store.get_workout(workout_id).unwrap();
    assert!(saved.completed);
    assert!(!saved.planned);
    assert_eq!(saved.duration, Some(1800));
    assert!(saved.exercises[0].sets[0].completed);
    assert!(!saved.exercises[0].sets[1].completed);
    assert_eq!(store.summary().total_workouts, 1);
    assert_eq!(store.summary().favorite_exercise.as_deref(), Some("Bench Press"));

    let reopened = WorkoutStore::open_local(storage, clock)?;
    assert_eq!(reopened.workouts().len(), 1);
    assert_eq!(reopened.summary().total_workouts, 1);
    Ok(())
}

#[test]
fn test_complete_workout_keeps_sets_marked_done_without_load() -> Result<()> {
    let mut store = WorkoutStore::open_local(memory_storage(), fixed_clock(2025, 3, 12, 18))?;
    let workout_id = store.start_workout("Bodyweight");
    let exercise_id = store
        .add_exercise_to_workout(catalog_exercise("Pull Up"))
        .unwrap();
    let done_set = store.active_workout().unwrap().exercises[0].sets[0].id;
    store.update_set(exercise_id, done_set, &SetUpdate::completed(true));
    let reps_only = store.add_set_to_exercise(exercise_id).unwrap();
    store.update_set(
        exercise_id,
        reps_only,
        &SetUpdate::reps(12_u32).with_completed(true),
    );

    store.complete_workout();

    let sets = &store.get_workout(workout_id).unwrap().exercises[0].sets;
    assert!(sets[0].weight.is_none() && sets[0].reps.is_none());
    assert!(sets[0].completed);
    assert!(sets[1].completed);
    Ok(())
}

#[test]
fn test_active_workout_is_restored_after_restart() -> Result<()> {
    let storage = memory_storage();
    let clock = fixed_clock(2025, 3, 12, 18);

    let mut store = WorkoutStore::open_local(storage.clone(), clock.clone())?;
    let workout_id = store.start_workout("Leg Day");
    store.add_exercise_to_workout(catalog_exercise("Squat"));
    drop(store);

    let restored = WorkoutStore::open_local(storage, clock)?;
    let active = restored.active_workout().unwrap();
    assert_eq!(active.id, workout_id);
    assert_eq!(active.exercises.len(), 1);
    assert_eq!(active.exercises[0].sets.len(), 1);
    Ok(())
}

#[test]
fn test_cached_completed_workout_is_not_restored_as_active() -> Result<()> {
    let storage = memory_storage();
    let stale = completed_workout("Old", at(2025, 3, 1, 9), &[]);
    save_json(storage.as_ref(), storage_keys::ACTIVE_WORKOUT, &stale)?;

    let store = WorkoutStore::open_local(storage, fixed_clock(2025, 3, 12, 18))?;
    assert!(store.active_workout().is_none());
    Ok(())
}

#[test]
fn test_corrupt_active_workout_is_ignored() -> Result<()> {
    let storage = memory_storage();
    storage.set(storage_keys::ACTIVE_WORKOUT, "{not json")?;

    let store = WorkoutStore::open_local(storage, fixed_clock(2025, 3, 12, 18))?;
    assert!(store.active_workout().is_none());
    Ok(())
}

#[test]
fn test_duplicate_last_set_copies_values_uncompleted() -> Result<()> {
    let mut store = WorkoutStore::open_local(memory_storage(), fixed_clock(2025, 3, 12, 18))?;
    store.start_workout("Pull");
    let exercise_id = store
        .add_exercise_to_workout(catalog_exercise("Deadlift"))
        .unwrap();
    let set_id = store.active_workout().unwrap().exercises[0].sets[0].id;
    store.update_set(
        exercise_id,
        set_id,
        &SetUpdate::weight(225.0).with_reps(5_u32).with_completed(true),
    );

    let copy_id = store.duplicate_last_set(exercise_id).unwrap();
    let sets = &store.active_workout().unwrap().exercises[0].sets;
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[1].id, copy_id);
    assert_eq!(sets[1].weight, Some(SetValue::Number(225.0)));
    assert_eq!(sets[1].reps, Some(SetValue::Number(5.0)));
    assert!(!sets[1].completed);
    Ok(())
}

#[test]
fn test_cancel_discards_active_workout() -> Result<()> {
    let storage = memory_storage();
    let mut store = WorkoutStore::open_local(storage.clone(), fixed_clock(2025, 3, 12, 18))?;
    store.start_workout("Abandoned");
    store.cancel_workout();

    assert!(store.active_workout().is_none());
    assert!(store.workouts().is_empty());
    assert!(storage.get(storage_keys::ACTIVE_WORKOUT)?.is_none());
    Ok(())
}

#[test]
fn test_reorder_exercises_replaces_order() -> Result<()> {
    let mut store = WorkoutStore::open_local(memory_storage(), fixed_clock(2025, 3, 12, 18))?;
    store.start_workout("Full Body");
    store.add_exercise_to_workout(catalog_exercise("Squat"));
    store.add_exercise_to_workout(catalog_exercise("Bench Press"));

    let mut reversed = store.active_workout().unwrap().exercises.clone();
    reversed.reverse();
    store.reorder_exercises(reversed);

    let names: Vec<_> = store
        .active_workout()
        .unwrap()
        .exercises
        .iter()
        .map(|e| e.exercise.name.as_str())
        .collect();
    assert_eq!(names, ["Bench Press", "Squat"]);
    Ok(())
}

#[test]
fn test_exercise_notes_update_history_and_blank_clears() -> Result<()> {
    let storage = memory_storage();
    let mut store = WorkoutStore::open_local(storage.clone(), fixed_clock(2025, 3, 12, 18))?;
    store.start_workout("Push");
    let exercise_id = store
        .add_exercise_to_workout(catalog_exercise("Bench Press"))
        .unwrap();
    let workout_id = store.complete_workout().unwrap();

    store.update_exercise_notes(exercise_id, "  felt strong  ");
    let notes = |store: &WorkoutStore| {
        store.get_workout(workout_id).unwrap().exercises[0]
            .notes
            .clone()
    };
    assert_eq!(notes(&store).as_deref(), Some("felt strong"));

    let persisted: LocalWorkoutData =
        ironlog::cache::load_json(storage.as_ref(), storage_keys::WORKOUT_DATA)?.unwrap();
    assert_eq!(
        persisted.workouts[0].exercises[0].notes.as_deref(),
        Some("felt strong")
    );

    store.update_exercise_notes(exercise_id, "   ");
    assert!(notes(&store).is_none());
    Ok(())
}

#[test]
fn test_exercise_history_is_newest_first() -> Result<()> {
    let storage = memory_storage();
    let bench = catalog_exercise("Bench Press");
    let squat = catalog_exercise("Squat");
    let history = vec![
        completed_workout("A", at(2025, 3, 1, 9), &[(&bench, &[(100.0, 5.0)])]),
        completed_workout("B", at(2025, 3, 8, 9), &[(&squat, &[(200.0, 5.0)])]),
        completed_workout("C", at(2025, 3, 5, 9), &[(&bench, &[(110.0, 5.0)])]),
    ];
    save_json(
        storage.as_ref(),
        storage_keys::WORKOUT_DATA,
        &LocalWorkoutData { workouts: history },
    )?;

    let store = WorkoutStore::open_local(storage, fixed_clock(2025, 3, 12, 18))?;
    let names: Vec<_> = store
        .exercise_history(&bench.id)
        .iter()
        .map(|(w, _)| w.name.as_str())
        .collect();
    assert_eq!(names, ["C", "A"]);
    Ok(())
}

#[test]
fn test_plan_exercise_seeds_from_latest_session() -> Result<()> {
    let storage = memory_storage();
    let bench = catalog_exercise("Bench Press");
    let history = vec![
        completed_workout("Old", at(2025, 3, 1, 9), &[(&bench, &[(100.0, 8.0)])]),
        completed_workout(
            "Recent",
            at(2025, 3, 8, 9),
            &[(&bench, &[(135.0, 10.0), (145.0, 6.0)])],
        ),
    ];
    save_json(
        storage.as_ref(),
        storage_keys::WORKOUT_DATA,
        &LocalWorkoutData { workouts: history },
    )?;
    let store = WorkoutStore::open_local(storage, fixed_clock(2025, 3, 12, 18))?;

    let planned = store.plan_exercise(bench);
    assert_eq!(planned.previous_sets.len(), 2);
    assert_eq!(planned.previous_sets[1].weight, Some(145.0));
    assert_eq!(planned.reference_weight, Some(145.0));
    assert_eq!(planned.reference_reps, Some(10.0));

    let fresh = store.plan_exercise(catalog_exercise("Squat"));
    assert!(fresh.previous_sets.is_empty());
    assert!(fresh.reference_weight.is_none());
    Ok(())
}

#[test]
fn test_workouts_by_date_use_local_calendar_day() -> Result<()> {
    let storage = memory_storage();
    // 02:00 UTC on the 9th is the evening of the 8th at UTC-5
    let late = completed_workout("Late", at(2025, 3, 9, 2), &[]);
    save_json(
        storage.as_ref(),
        storage_keys::WORKOUT_DATA,
        &LocalWorkoutData {
            workouts: vec![late],
        },
    )?;
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let clock = Arc::new(FixedClock::with_offset(at(2025, 3, 12, 18), offset));
    let store = WorkoutStore::open_local(storage, clock)?;

    let march_8 = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
    assert_eq!(store.get_workouts_by_date(march_8).len(), 1);
    assert!(store.get_workouts_by_date(march_8 + Duration::days(1)).is_empty());
    Ok(())
}

#[test]
fn test_summary_counts_this_week_from_clock() -> Result<()> {
    let storage = memory_storage();
    let workouts: Vec<Workout> = vec![
        completed_workout("Earlier", at(2025, 2, 20, 9), &[]),
        completed_workout("This week", at(2025, 3, 10, 9), &[]),
    ];
    save_json(
        storage.as_ref(),
        storage_keys::WORKOUT_DATA,
        &LocalWorkoutData { workouts },
    )?;

    let store = WorkoutStore::open_local(storage, fixed_clock(2025, 3, 12, 18))?;
    assert_eq!(store.summary().total_workouts, 2);
    assert_eq!(store.summary().this_week_workouts, 1);
    assert_eq!(store.summary().total_duration, 3600);
    Ok(())
}
