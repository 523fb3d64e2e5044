// ABOUTME: Integration tests for the health goal store in local-only mode
// ABOUTME: Covers completion summaries, streaks, entry updates, toggles and cascades
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use common::{at, fixed_clock, memory_storage};
use ironlog::health::{HealthStore, NewHealthGoal};
use ironlog_core::models::{
    HealthEntryUpdate, HealthGoal, HealthGoalFrequency, HealthGoalType, HealthGoalUpdate,
};

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

struct Seeded {
    store: HealthStore,
    water: HealthGoal,
    vitamins: HealthGoal,
    walk: HealthGoal,
}

// Wednesday March 12 2025; water done 10-12, vitamins 11-12, weekly walk on the 13th
fn seeded() -> Result<Seeded> {
    let mut store = HealthStore::open_local(memory_storage(), fixed_clock(2025, 3, 12, 18))?;
    let water = store.create_goal(
        NewHealthGoal::new("Water", HealthGoalType::Hydration, HealthGoalFrequency::Daily)
            .with_target(8.0),
    );
    let vitamins = store.create_goal(
        NewHealthGoal::new("Vitamins", HealthGoalType::Supplement, HealthGoalFrequency::Daily)
            .with_emoji("🍊"),
    );
    let walk = store.create_goal(
        NewHealthGoal::new("Long walk", HealthGoalType::Activity, HealthGoalFrequency::Weekly)
            .with_unit("km")
            .with_description("Somewhere green"),
    );
    for day in [10, 11, 12] {
        store.mark_goal_complete(water.id, march(day), Some(8.0), None);
    }
    for day in [11, 12] {
        store.mark_goal_complete(vitamins.id, march(day), None, None);
    }
    store.mark_goal_complete(walk.id, march(13), Some(6.5), None);
    Ok(Seeded {
        store,
        water,
        vitamins,
        walk,
    })
}

#[test]
fn test_goal_drafts_keep_explicit_fields() -> Result<()> {
    let Seeded {
        vitamins, walk, ..
    } = seeded()?;

    assert_eq!(vitamins.emoji.as_deref(), Some("🍊"));
    assert!(vitamins.unit.is_none());
    assert_eq!(walk.unit.as_deref(), Some("km"));
    assert_eq!(walk.emoji.as_deref(), Some("🚶"));
    assert_eq!(walk.description.as_deref(), Some("Somewhere green"));
    assert_eq!(walk.created_at, at(2025, 3, 12, 18));
    Ok(())
}

#[test]
fn test_daily_summary_counts_active_daily_goals() -> Result<()> {
    let Seeded { store, .. } = seeded()?;

    let wednesday = store.daily_summary(march(12));
    assert_eq!(wednesday.total_goals, 2);
    assert_eq!(wednesday.completed_goals, 2);
    assert_eq!(wednesday.completion_rate, 100);

    let monday = store.daily_summary(march(10));
    assert_eq!(monday.completion_rate, 50);
    assert_eq!(monday.entries.len(), 1);

    assert_eq!(store.daily_summary(march(9)).completion_rate, 0);
    Ok(())
}

#[test]
fn test_weekly_summary_splits_daily_and_weekly_goals() -> Result<()> {
    let Seeded { store, walk, .. } = seeded()?;

    let week = store.weekly_summary(march(9));
    assert_eq!(week.week_end, march(15));
    assert_eq!(week.total_daily_goals, 14);
    assert_eq!(week.completed_daily_goals, 5);
    assert_eq!(week.weekly_goals.len(), 1);
    assert_eq!(week.weekly_entries.len(), 1);
    assert_eq!(week.weekly_entries[0].goal_id, walk.id);
    // (0 + 50 + 100 + 100 + 0 + 0 + 0) / 7
    assert_eq!(week.average_completion_rate, 36);
    Ok(())
}

#[test]
fn test_stats_report_streaks_and_week_completion() -> Result<()> {
    let Seeded { store, .. } = seeded()?;

    let stats = store.stats_today();
    assert_eq!(stats, store.stats(march(12)));
    assert_eq!(stats.total_goals, 3);
    assert_eq!(stats.active_goals, 3);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.this_week_completion, 36);
    assert_eq!(stats.last_week_completion, 0);

    // A missed day breaks the current streak but not the longest one
    assert_eq!(store.stats(march(13)).current_streak, 0);
    assert_eq!(store.stats(march(13)).longest_streak, 2);
    Ok(())
}

#[test]
fn test_entry_updates_manage_completed_at() -> Result<()> {
    let storage = memory_storage();
    let clock = fixed_clock(2025, 3, 12, 8);
    let mut store = HealthStore::open_local(storage, clock.clone())?;
    let water = store.create_goal(NewHealthGoal::new(
        "Water",
        HealthGoalType::Hydration,
        HealthGoalFrequency::Daily,
    ));
    let entry_id = store
        .mark_goal_complete(water.id, march(12), None, None)
        .unwrap();
    assert_eq!(
        store.entries()[0].completed_at,
        Some(at(2025, 3, 12, 8))
    );

    store.update_entry(
        entry_id,
        &HealthEntryUpdate {
            completed: Some(false),
            notes: Some(Some("forgot".into())),
            ..HealthEntryUpdate::default()
        },
    );
    assert!(!store.entries()[0].completed);
    assert!(store.entries()[0].completed_at.is_none());
    assert_eq!(store.entries()[0].notes.as_deref(), Some("forgot"));

    clock.advance(Duration::hours(4));
    store.update_entry(
        entry_id,
        &HealthEntryUpdate {
            completed: Some(true),
            value: Some(Some(9.0)),
            ..HealthEntryUpdate::default()
        },
    );
    let entry = store.entry_for_goal_and_date(water.id, march(12)).unwrap();
    assert!(entry.completed);
    assert_eq!(entry.value, Some(9.0));
    assert_eq!(entry.completed_at, Some(at(2025, 3, 12, 12)));

    store.mark_goal_incomplete(water.id, march(12));
    let entry = store.entry_for_goal_and_date(water.id, march(12)).unwrap();
    assert!(!entry.completed);
    assert!(entry.completed_at.is_none());
    Ok(())
}

#[test]
fn test_toggle_update_and_cascade_delete() -> Result<()> {
    let Seeded {
        mut store,
        water,
        vitamins,
        ..
    } = seeded()?;

    assert_eq!(store.toggle_goal_active(water.id), Some(false));
    assert_eq!(
        store.active_goals_by_frequency(HealthGoalFrequency::Daily).len(),
        1
    );
    assert_eq!(store.toggle_goal_active(water.id), Some(true));

    store.update_goal(
        vitamins.id,
        &HealthGoalUpdate {
            name: Some("Vitamin D".into()),
            target: Some(Some(2.0)),
            ..HealthGoalUpdate::default()
        },
    );
    let updated = store.goal(vitamins.id).unwrap();
    assert_eq!(updated.name, "Vitamin D");
    assert_eq!(updated.target, Some(2.0));

    store.delete_goal(water.id);
    assert!(store.goal(water.id).is_none());
    assert!(store.entries().iter().all(|e| e.goal_id != water.id));
    assert_eq!(store.entries_for_date(march(12)).len(), 1);

    assert!(store.toggle_goal_active(water.id).is_none());
    assert!(store
        .mark_goal_complete(water.id, march(12), None, None)
        .is_none());
    Ok(())
}

#[test]
fn test_local_health_data_survives_reopen() -> Result<()> {
    let storage = memory_storage();
    let clock = fixed_clock(2025, 3, 12, 18);
    let mut store = HealthStore::open_local(storage.clone(), clock.clone())?;
    let sleep = store.create_goal(NewHealthGoal::new(
        "Sleep",
        HealthGoalType::Sleep,
        HealthGoalFrequency::Daily,
    ));
    store.mark_goal_complete(sleep.id, march(12), Some(7.5), Some("restless".into()));
    drop(store);

    let reopened = HealthStore::open_local(storage, clock)?;
    assert_eq!(reopened.goals(), [sleep.clone()]);
    let entry = reopened.entry_for_goal_and_date(sleep.id, march(12)).unwrap();
    assert_eq!(entry.value, Some(7.5));
    assert_eq!(entry.notes.as_deref(), Some("restless"));
    Ok(())
}
