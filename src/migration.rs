// ABOUTME: One-shot upload of local-only data into the remote store for a user
// ABOUTME: Counts every failure and only marks the cache migrated after a clean run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Local to Remote Migration
//!
//! Data recorded before a user signed in lives only in the local cache. The
//! migration reads those documents, writes each record through the repositories
//! and sets the migrated flag once nothing failed. A partial run leaves the flag
//! unset; records already uploaded are upserts, so running again is safe.

use crate::cache::{load_json, LocalStorage};
use crate::database::repositories::Repositories;
use crate::errors::AppResult;
use crate::health::LocalHealthData;
use crate::store::LocalWorkoutData;
use ironlog_core::constants::storage_keys;
use ironlog_core::models::{Exercise, HealthEntry, HealthGoal, Workout};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const MIGRATED: &str = "true";

/// Everything found in the local cache
#[derive(Debug, Clone, Default)]
pub struct LegacyData {
    /// Workout history
    pub workouts: Vec<Workout>,
    /// Health goals
    pub goals: Vec<HealthGoal>,
    /// Health entries
    pub entries: Vec<HealthEntry>,
    /// Custom exercises
    pub custom_exercises: Vec<Exercise>,
}

impl LegacyData {
    /// Read the workout, health and custom exercise documents
    ///
    /// # Errors
    ///
    /// Returns an error if a document exists but cannot be decoded
    pub fn load(storage: &dyn LocalStorage) -> AppResult<Self> {
        let workouts: LocalWorkoutData =
            load_json(storage, storage_keys::WORKOUT_DATA)?.unwrap_or_default();
        let health: LocalHealthData =
            load_json(storage, storage_keys::HEALTH_DATA)?.unwrap_or_default();
        let custom_exercises: Vec<Exercise> =
            load_json(storage, storage_keys::CUSTOM_EXERCISES)?.unwrap_or_default();

        Ok(Self {
            workouts: workouts.workouts,
            goals: health.goals,
            entries: health.entries,
            custom_exercises,
        })
    }

    /// Whether any list is non-empty
    #[must_use]
    pub fn has_local_data(&self) -> bool {
        !self.workouts.is_empty()
            || !self.goals.is_empty()
            || !self.entries.is_empty()
            || !self.custom_exercises.is_empty()
    }
}

/// Outcome of one migration run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Workouts uploaded
    pub workouts: usize,
    /// Goals uploaded
    pub goals: usize,
    /// Entries uploaded
    pub entries: usize,
    /// Custom exercises uploaded
    pub custom_exercises: usize,
    /// One line per failed record
    pub failures: Vec<String>,
    /// Whether the migrated flag was written
    pub marked_migrated: bool,
}

impl MigrationReport {
    /// Whether every record was uploaded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total records uploaded
    #[must_use]
    pub const fn uploaded(&self) -> usize {
        self.workouts + self.goals + self.entries + self.custom_exercises
    }

    /// Notification text for the user
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_clean() {
            format!(
                "Your data has been synced to the cloud ({} workouts, {} goals, {} exercises).",
                self.workouts, self.goals, self.custom_exercises
            )
        } else {
            "Some of your data could not be synced. It is still saved on this device and will be retried.".to_owned()
        }
    }
}

/// Whether the migrated flag is set
///
/// # Errors
///
/// Returns an error if the cache cannot be read
pub fn is_migrated(storage: &dyn LocalStorage) -> AppResult<bool> {
    Ok(storage.get(storage_keys::MIGRATED_FLAG)?.as_deref() == Some(MIGRATED))
}

/// Clear the migrated flag so the next start migrates again
///
/// # Errors
///
/// Returns an error if the cache cannot be written
pub fn reset_migration_flag(storage: &dyn LocalStorage) -> AppResult<()> {
    storage.remove(storage_keys::MIGRATED_FLAG)
}

/// Upload all local data for `user_id`
///
/// # Errors
///
/// Returns an error only if the local documents cannot be read or the flag
/// cannot be written; individual upload failures are reported in the
/// [`MigrationReport`]
#[instrument(skip(storage, repositories))]
pub async fn migrate_to_remote(
    storage: &dyn LocalStorage,
    repositories: &Repositories,
    user_id: Uuid,
) -> AppResult<MigrationReport> {
    let data = LegacyData::load(storage)?;
    let mut report = MigrationReport::default();

    if !data.has_local_data() {
        info!("No local data to migrate");
        storage.set(storage_keys::MIGRATED_FLAG, MIGRATED)?;
        report.marked_migrated = true;
        return Ok(report);
    }

    for workout in &data.workouts {
        match repositories.workouts.save_workout(user_id, workout).await {
            Ok(()) => report.workouts += 1,
            Err(e) => {
                warn!(workout_id = %workout.id, error = %e, "Failed to migrate workout");
                report.failures.push(format!("workout {}: {e}", workout.id));
            }
        }
    }

    // Goals before entries so entries never reference a missing goal
    for goal in &data.goals {
        match repositories.health.save_goal(user_id, goal).await {
            Ok(()) => report.goals += 1,
            Err(e) => {
                warn!(goal_id = %goal.id, error = %e, "Failed to migrate health goal");
                report.failures.push(format!("health goal {}: {e}", goal.id));
            }
        }
    }

    for entry in &data.entries {
        match repositories.health.save_entry(user_id, entry).await {
            Ok(()) => report.entries += 1,
            Err(e) => {
                warn!(entry_id = %entry.id, error = %e, "Failed to migrate health entry");
                report.failures.push(format!("health entry {}: {e}", entry.id));
            }
        }
    }

    for exercise in &data.custom_exercises {
        match repositories
            .exercises
            .save_custom_exercise(user_id, exercise)
            .await
        {
            Ok(()) => report.custom_exercises += 1,
            Err(e) => {
                warn!(exercise_id = %exercise.id, error = %e, "Failed to migrate custom exercise");
                report
                    .failures
                    .push(format!("custom exercise {}: {e}", exercise.id));
            }
        }
    }

    if report.is_clean() {
        storage.set(storage_keys::MIGRATED_FLAG, MIGRATED)?;
        report.marked_migrated = true;
        info!(uploaded = report.uploaded(), "Local data migrated");
    } else {
        warn!(
            uploaded = report.uploaded(),
            failed = report.failures.len(),
            "Migration finished with failures, flag left unset"
        );
    }

    Ok(report)
}
