// ABOUTME: Database operations for user-created exercises
// ABOUTME: Custom exercises are immutable after creation, so only insert, list and delete exist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{decode_muscle_groups, encode_muscle_groups, Database};
use crate::errors::{AppError, AppResult};
use ironlog_core::models::{Exercise, ExerciseType};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

impl Database {
    /// Create the custom exercise table
    pub(super) async fn migrate_custom_exercises(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS custom_exercises (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                exercise_type TEXT NOT NULL DEFAULT 'strength',
                muscle_groups TEXT NOT NULL DEFAULT '[]',
                instructions TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to migrate custom exercises: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_custom_exercises_user_id ON custom_exercises(user_id)",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to migrate custom exercises: {e}")))?;

        Ok(())
    }
}

/// Custom exercise queries over the pool
#[derive(Clone)]
pub struct CustomExerciseManager {
    pool: SqlitePool,
}

impl CustomExerciseManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a custom exercise, ignoring a repeated id
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn upsert(&self, user_id: Uuid, exercise: &Exercise) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO custom_exercises (id, user_id, name, exercise_type, muscle_groups, instructions)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(&exercise.id)
        .bind(user_id.to_string())
        .bind(&exercise.name)
        .bind(exercise.exercise_type.as_str())
        .bind(encode_muscle_groups(&exercise.muscle_groups)?)
        .bind(&exercise.instructions)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save custom exercise: {e}")))?;
        Ok(())
    }

    /// All custom exercises for a user in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, exercise_type, muscle_groups, instructions
            FROM custom_exercises
            WHERE user_id = $1
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list custom exercises: {e}")))?;

        rows.iter().map(row_to_custom_exercise).collect()
    }

    /// Delete one custom exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(&self, user_id: Uuid, exercise_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM custom_exercises WHERE id = $1 AND user_id = $2")
            .bind(exercise_id)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete custom exercise: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_custom_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let exercise_type: String = row.get("exercise_type");
    let muscle_groups: String = row.get("muscle_groups");

    Ok(Exercise {
        id: row.get("id"),
        name: row.get("name"),
        exercise_type: ExerciseType::parse(&exercise_type),
        muscle_groups: decode_muscle_groups(&muscle_groups)?,
        instructions: row.get("instructions"),
        custom: true,
    })
}
