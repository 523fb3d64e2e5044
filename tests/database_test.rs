// ABOUTME: Integration tests for the SQLite remote store managers
// ABOUTME: Workout graph round trips, per-user isolation, health upserts and custom exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{at, catalog_exercise, completed_workout, create_test_database};
use ironlog::errors::ErrorCode;
use ironlog_core::models::{
    Exercise, ExerciseType, HealthEntry, HealthGoal, HealthGoalFrequency, HealthGoalType,
    PlannedExercise, PreviousSet, SetValue, Workout, WorkoutSet,
};
use uuid::Uuid;

fn goal(name: &str) -> HealthGoal {
    HealthGoal {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        goal_type: HealthGoalType::Hydration,
        frequency: HealthGoalFrequency::Daily,
        target: Some(8.0),
        unit: Some("glasses".into()),
        emoji: Some("💧".into()),
        description: None,
        active: true,
        created_at: at(2025, 3, 1, 8),
    }
}

fn entry(goal_id: Uuid, date: NaiveDate, completed: bool) -> HealthEntry {
    HealthEntry {
        id: Uuid::new_v4(),
        goal_id,
        date,
        completed,
        value: None,
        notes: None,
        completed_at: completed.then(|| at(2025, 3, 1, 20)),
    }
}

#[tokio::test]
async fn test_workout_graph_round_trip() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let bench = catalog_exercise("Bench Press");
    let squat = catalog_exercise("Squat");

    let mut workout = completed_workout(
        "Full Body",
        at(2025, 3, 10, 18),
        &[
            (&bench, &[(135.0, 10.0), (145.0, 8.0), (155.0, 6.0)]),
            (&squat, &[(225.0, 5.0)]),
        ],
    );
    workout.notes = Some("Good session".into());
    workout.exercises[0].notes = Some("Paused reps".into());
    workout.exercises[1].sets.push(WorkoutSet {
        weight: Some(SetValue::Text("bodyweight".into())),
        ..WorkoutSet::empty(squat.id.clone())
    });

    db.workouts().upsert(user, &workout).await?;
    let loaded = db.workouts().get(user, workout.id).await?.unwrap();
    assert_eq!(loaded, workout);
    Ok(())
}

#[tokio::test]
async fn test_resave_replaces_children() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let bench = catalog_exercise("Bench Press");
    let mut workout = completed_workout("Push", at(2025, 3, 10, 18), &[(&bench, &[(100.0, 5.0)])]);
    db.workouts().upsert(user, &workout).await?;

    workout.exercises[0].sets.clear();
    workout.exercises[0]
        .sets
        .push(WorkoutSet::empty(bench.id.clone()));
    workout.name = "Push (edited)".into();
    db.workouts().upsert(user, &workout).await?;

    let all = db.workouts().list(user).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Push (edited)");
    assert_eq!(all[0].exercises[0].sets.len(), 1);
    assert!(all[0].exercises[0].sets[0].weight.is_none());
    Ok(())
}

#[tokio::test]
async fn test_planned_exercises_keep_order_and_snapshots() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let mut plan = Workout::new_planned("Friday", at(2025, 3, 14, 17));
    plan.planned_exercises = vec![
        PlannedExercise {
            reference_weight: Some(145.0),
            reference_reps: Some(10.0),
            previous_sets: vec![
                PreviousSet {
                    weight: Some(135.0),
                    reps: Some(10.0),
                },
                PreviousSet {
                    weight: Some(145.0),
                    reps: None,
                },
            ],
            ..PlannedExercise::new(catalog_exercise("Bench Press"))
        },
        PlannedExercise::new(catalog_exercise("Plank")),
    ];

    db.workouts().upsert(user, &plan).await?;
    db.workouts().upsert(user, &plan).await?;

    let loaded = db.workouts().get(user, plan.id).await?.unwrap();
    assert!(loaded.planned);
    assert_eq!(loaded.planned_exercises, plan.planned_exercises);
    Ok(())
}

#[tokio::test]
async fn test_workouts_are_isolated_per_user() -> Result<()> {
    let db = create_test_database().await?;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let workout = completed_workout("Mine", at(2025, 3, 10, 18), &[]);
    db.workouts().upsert(owner, &workout).await?;

    let err = db.workouts().upsert(intruder, &workout).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);
    assert!(db.workouts().list(intruder).await?.is_empty());
    assert!(!db.workouts().delete(intruder, workout.id).await?);
    assert_eq!(db.workouts().list(owner).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_list_orders_by_date() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let later = completed_workout("Later", at(2025, 3, 10, 18), &[]);
    let earlier = completed_workout("Earlier", at(2025, 3, 2, 18), &[]);
    db.workouts().upsert(user, &later).await?;
    db.workouts().upsert(user, &earlier).await?;

    let names: Vec<_> = db
        .workouts()
        .list(user)
        .await?
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(names, ["Earlier", "Later"]);
    Ok(())
}

#[tokio::test]
async fn test_delete_and_notes_update() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let bench = catalog_exercise("Bench Press");
    let workout = completed_workout("Push", at(2025, 3, 10, 18), &[(&bench, &[(100.0, 5.0)])]);
    let instance_id = workout.exercises[0].id;
    db.workouts().upsert(user, &workout).await?;

    let updated = db
        .workouts()
        .update_exercise_notes(user, instance_id, Some("elbows tucked"))
        .await?;
    assert_eq!(updated, 1);
    let loaded = db.workouts().get(user, workout.id).await?.unwrap();
    assert_eq!(loaded.exercises[0].notes.as_deref(), Some("elbows tucked"));

    assert_eq!(
        db.workouts()
            .update_exercise_notes(Uuid::new_v4(), instance_id, None)
            .await?,
        0
    );

    assert!(db.workouts().delete(user, workout.id).await?);
    assert!(db.workouts().get(user, workout.id).await?.is_none());
    assert!(!db.workouts().delete(user, workout.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_health_entry_upserts_on_goal_and_date() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let water = goal("Water");
    db.health().upsert_goal(user, &water).await?;

    let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    db.health()
        .upsert_entry(user, &entry(water.id, day, false))
        .await?;
    let mut replacement = entry(water.id, day, true);
    replacement.value = Some(8.0);
    db.health().upsert_entry(user, &replacement).await?;

    let entries = db.health().list_entries(user).await?;
    assert_eq!(entries.len(), 1);
    assert!(entries[0].completed);
    assert_eq!(entries[0].value, Some(8.0));
    assert_eq!(entries[0].date, day);
    assert!(entries[0].completed_at.is_some());
    Ok(())
}

#[tokio::test]
async fn test_goal_update_and_cascade_delete() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let mut water = goal("Water");
    let sleep = HealthGoal {
        created_at: at(2025, 3, 2, 8),
        ..goal("Sleep")
    };
    db.health().upsert_goal(user, &water).await?;
    db.health().upsert_goal(user, &sleep).await?;
    db.health()
        .upsert_entry(
            user,
            &entry(water.id, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(), true),
        )
        .await?;

    water.active = false;
    water.target = Some(10.0);
    db.health().upsert_goal(user, &water).await?;
    let goals = db.health().list_goals(user).await?;
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0], water);
    assert_eq!(goals[1].name, "Sleep");

    assert!(db.health().delete_goal(user, water.id).await?);
    assert_eq!(db.health().list_goals(user).await?.len(), 1);
    assert!(db.health().list_entries(user).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_custom_exercises_insert_once() -> Result<()> {
    let db = create_test_database().await?;
    let user = Uuid::new_v4();
    let exercise = Exercise {
        id: Uuid::new_v4().to_string(),
        name: "Landmine Press".into(),
        exercise_type: ExerciseType::Strength,
        muscle_groups: vec!["shoulders".into(), "chest".into()],
        instructions: None,
        custom: true,
    };

    db.custom_exercises().upsert(user, &exercise).await?;
    db.custom_exercises().upsert(user, &exercise).await?;
    let listed = db.custom_exercises().list(user).await?;
    assert_eq!(listed, vec![exercise.clone()]);
    assert!(db.custom_exercises().list(Uuid::new_v4()).await?.is_empty());

    assert!(db.custom_exercises().delete(user, &exercise.id).await?);
    assert!(db.custom_exercises().list(user).await?.is_empty());
    Ok(())
}
