// ABOUTME: Workout repository implementation
// ABOUTME: Adapts WorkoutManager results to repository-layer errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::WorkoutRepository;
use crate::database::Database;
use crate::errors::DatabaseError;
use async_trait::async_trait;
use ironlog_core::models::Workout;
use uuid::Uuid;

/// SQLite implementation of `WorkoutRepository`
pub struct WorkoutRepositoryImpl {
    db: Database,
}

impl WorkoutRepositoryImpl {
    /// Create a new `WorkoutRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn save_workout(&self, user_id: Uuid, workout: &Workout) -> Result<(), DatabaseError> {
        self.db
            .workouts()
            .upsert(user_id, workout)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_workouts(&self, user_id: Uuid) -> Result<Vec<Workout>, DatabaseError> {
        self.db
            .workouts()
            .list(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool, DatabaseError> {
        self.db
            .workouts()
            .delete(user_id, workout_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn update_exercise_notes(
        &self,
        user_id: Uuid,
        workout_exercise_id: Uuid,
        notes: Option<String>,
    ) -> Result<(), DatabaseError> {
        let updated = self
            .db
            .workouts()
            .update_exercise_notes(user_id, workout_exercise_id, notes.as_deref())
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })?;

        if updated == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "workout exercise",
                entity_id: workout_exercise_id.to_string(),
            });
        }
        Ok(())
    }
}
