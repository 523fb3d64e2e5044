// ABOUTME: Custom exercise repository implementation
// ABOUTME: Adapts CustomExerciseManager results to repository-layer errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseRepository;
use crate::database::Database;
use crate::errors::DatabaseError;
use async_trait::async_trait;
use ironlog_core::models::Exercise;
use uuid::Uuid;

/// SQLite implementation of `ExerciseRepository`
pub struct ExerciseRepositoryImpl {
    db: Database,
}

impl ExerciseRepositoryImpl {
    /// Create a new `ExerciseRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExerciseRepository for ExerciseRepositoryImpl {
    async fn save_custom_exercise(
        &self,
        user_id: Uuid,
        exercise: &Exercise,
    ) -> Result<(), DatabaseError> {
        self.db
            .custom_exercises()
            .upsert(user_id, exercise)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_custom_exercises(&self, user_id: Uuid) -> Result<Vec<Exercise>, DatabaseError> {
        self.db
            .custom_exercises()
            .list(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn delete_custom_exercise(
        &self,
        user_id: Uuid,
        exercise_id: &str,
    ) -> Result<bool, DatabaseError> {
        self.db
            .custom_exercises()
            .delete(user_id, exercise_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
