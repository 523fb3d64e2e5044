// ABOUTME: Integration tests for the write-behind sync worker and remote-mode stores
// ABOUTME: Verifies dispatch order, flush, failure counting and disabled configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use common::{at, catalog_exercise, create_test_database, fixed_clock, memory_storage};
use ironlog::cache::LocalStorage;
use ironlog::config::SyncConfig;
use ironlog::database::repositories::{Repositories, WorkoutRepository};
use ironlog::errors::DatabaseError;
use ironlog::health::{HealthStore, NewHealthGoal};
use ironlog::library::ExerciseLibrary;
use ironlog::store::WorkoutStore;
use ironlog::sync::{SyncOperation, SyncWorker};
use ironlog_core::constants::storage_keys;
use ironlog_core::models::{
    ExerciseType, HealthGoalFrequency, HealthGoalType, SetUpdate, Workout,
};
use std::sync::Arc;
use uuid::Uuid;

struct FailingWorkouts;

#[async_trait]
impl WorkoutRepository for FailingWorkouts {
    async fn save_workout(&self, _user_id: Uuid, _workout: &Workout) -> Result<(), DatabaseError> {
        Err(DatabaseError::QueryError {
            context: "remote store unavailable".into(),
        })
    }

    async fn list_workouts(&self, _user_id: Uuid) -> Result<Vec<Workout>, DatabaseError> {
        Ok(Vec::new())
    }

    async fn delete_workout(&self, _user_id: Uuid, _workout_id: Uuid) -> Result<bool, DatabaseError> {
        Err(DatabaseError::ConnectionError {
            context: "remote store unavailable".into(),
        })
    }

    async fn update_exercise_notes(
        &self,
        _user_id: Uuid,
        _workout_exercise_id: Uuid,
        _notes: Option<String>,
    ) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_remote_workout_changes_reach_database() -> Result<()> {
    let db = create_test_database().await?;
    let repos = Repositories::from_database(&db);
    let user = Uuid::new_v4();
    let storage = memory_storage();
    let (sync, worker) = SyncWorker::spawn(repos.clone(), user, &SyncConfig::default());

    let mut store = WorkoutStore::open_remote(
        storage.clone(),
        fixed_clock(2025, 3, 12, 18),
        repos.workouts.as_ref(),
        user,
        sync.clone(),
    )
    .await?;

    store.start_workout("Push");
    let exercise_id = store
        .add_exercise_to_workout(catalog_exercise("Bench Press"))
        .unwrap();
    let set_id = store.active_workout().unwrap().exercises[0].sets[0].id;
    store.update_set(exercise_id, set_id, &SetUpdate::weight(135.0).with_reps(8_u32));
    let workout_id = store.complete_workout().unwrap();
    let plan_id = store.create_planned_workout("Next", at(2025, 3, 14, 17));
    store.update_exercise_notes(exercise_id, "slow negatives");
    sync.flush().await;

    let remote = repos.workouts.list_workouts(user).await?;
    assert_eq!(remote.len(), 2);
    let completed = remote.iter().find(|w| w.id == workout_id).unwrap();
    assert!(completed.exercises[0].sets[0].completed);
    assert_eq!(
        completed.exercises[0].notes.as_deref(),
        Some("slow negatives")
    );

    store.delete_planned_workout(plan_id);
    sync.flush().await;
    assert_eq!(repos.workouts.list_workouts(user).await?.len(), 1);

    // Remote mode keeps history out of the local cache
    assert!(storage.get(storage_keys::WORKOUT_DATA)?.is_none());

    let reopened = WorkoutStore::open_remote(
        storage,
        fixed_clock(2025, 3, 12, 19),
        repos.workouts.as_ref(),
        user,
        sync.clone(),
    )
    .await?;
    assert_eq!(reopened.summary().total_workouts, 1);

    drop((store, reopened, sync));
    let stats = worker.await?;
    assert_eq!(stats.applied, 4);
    assert_eq!(stats.failed, 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_writes_are_counted_not_retried() -> Result<()> {
    let db = create_test_database().await?;
    let real = Repositories::from_database(&db);
    let repos = Repositories {
        workouts: Arc::new(FailingWorkouts),
        ..real
    };
    let user = Uuid::new_v4();
    let (sync, worker) = SyncWorker::spawn(repos, user, &SyncConfig::default());

    let mut store = WorkoutStore::open_local(memory_storage(), fixed_clock(2025, 3, 12, 18))?;
    store.start_workout("Local copy survives");
    let workout_id = store.complete_workout().unwrap();

    let saved = store.get_workout(workout_id).unwrap().clone();
    sync.dispatch(SyncOperation::SaveWorkout(Box::new(saved)));
    sync.dispatch(SyncOperation::DeleteWorkout(workout_id));
    drop(sync);

    let stats = worker.await?;
    assert_eq!(stats.applied, 0);
    assert_eq!(stats.failed, 2);
    assert!(store.get_workout(workout_id).is_some());
    Ok(())
}

#[tokio::test]
async fn test_disabled_sync_returns_inert_handle() -> Result<()> {
    let db = create_test_database().await?;
    let config = SyncConfig {
        enabled: false,
        ..SyncConfig::default()
    };
    let (sync, worker) = SyncWorker::spawn(Repositories::from_database(&db), Uuid::new_v4(), &config);

    assert!(!sync.is_enabled());
    sync.dispatch(SyncOperation::DeleteWorkout(Uuid::new_v4()));
    sync.flush().await;
    assert_eq!(worker.await?, ironlog::sync::SyncStats::default());
    Ok(())
}

#[tokio::test]
async fn test_remote_health_store_round_trip() -> Result<()> {
    let db = create_test_database().await?;
    let repos = Repositories::from_database(&db);
    let user = Uuid::new_v4();
    let storage = memory_storage();
    let clock = fixed_clock(2025, 3, 12, 18);
    let (sync, _worker) = SyncWorker::spawn(repos.clone(), user, &SyncConfig::default());

    let mut health = HealthStore::open_remote(
        storage.clone(),
        clock.clone(),
        repos.health.as_ref(),
        user,
        sync.clone(),
    )
    .await?;
    let goal = health.create_goal(
        NewHealthGoal::new("Sleep", HealthGoalType::Sleep, HealthGoalFrequency::Daily)
            .with_target(8.0),
    );
    let day = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    health.mark_goal_complete(goal.id, day, Some(7.5), None);
    sync.flush().await;

    let reopened =
        HealthStore::open_remote(storage.clone(), clock, repos.health.as_ref(), user, sync.clone())
            .await?;
    assert_eq!(reopened.goals().len(), 1);
    assert_eq!(reopened.goals()[0].unit.as_deref(), Some("hours"));
    let entry = reopened.entry_for_goal_and_date(goal.id, day).unwrap();
    assert!(entry.completed);
    assert_eq!(entry.value, Some(7.5));

    health.delete_goal(goal.id);
    sync.flush().await;
    assert!(repos.health.list_goals(user).await?.is_empty());
    assert!(repos.health.list_entries(user).await?.is_empty());
    assert!(storage.get(storage_keys::HEALTH_DATA)?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_remote_custom_exercises_sync() -> Result<()> {
    let db = create_test_database().await?;
    let repos = Repositories::from_database(&db);
    let user = Uuid::new_v4();
    let (sync, _worker) = SyncWorker::spawn(repos.clone(), user, &SyncConfig::default());

    let mut library =
        ExerciseLibrary::open_remote(memory_storage(), repos.exercises.as_ref(), user, sync.clone())
            .await?;
    let created = library.add_custom(
        "Sled Push",
        ExerciseType::Cardio,
        vec!["legs".into()],
        Some("Drive through the balls of the feet".into()),
    )?;
    sync.flush().await;
    assert_eq!(repos.exercises.list_custom_exercises(user).await?, vec![created.clone()]);

    library.delete_custom(&created.id)?;
    sync.flush().await;
    assert!(repos.exercises.list_custom_exercises(user).await?.is_empty());
    Ok(())
}
