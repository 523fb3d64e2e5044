// ABOUTME: Database operations for workout graphs: workouts, exercises, sets and plans
// ABOUTME: Saves replace all child rows inside one transaction, loads rebuild order from sort_order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{decode_muscle_groups, encode_muscle_groups, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use ironlog_core::models::{
    Exercise, ExerciseType, PlannedExercise, PreviousSet, SetValue, Workout, WorkoutExercise,
    WorkoutSet,
};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

impl Database {
    /// Create workout tables
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                date TEXT NOT NULL,
                duration INTEGER,
                notes TEXT,
                completed BOOLEAN NOT NULL DEFAULT 0,
                planned BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                exercise_name TEXT NOT NULL,
                exercise_type TEXT NOT NULL DEFAULT 'strength',
                muscle_groups TEXT NOT NULL DEFAULT '[]',
                instructions TEXT,
                custom BOOLEAN NOT NULL DEFAULT 0,
                notes TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_sets (
                id TEXT PRIMARY KEY,
                workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
                weight TEXT,
                reps TEXT,
                duration REAL,
                distance REAL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS planned_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                exercise_name TEXT NOT NULL,
                exercise_type TEXT NOT NULL DEFAULT 'strength',
                muscle_groups TEXT NOT NULL DEFAULT '[]',
                instructions TEXT,
                custom BOOLEAN NOT NULL DEFAULT 0,
                reference_weight REAL,
                reference_reps REAL,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS planned_exercise_previous_sets (
                id TEXT PRIMARY KEY,
                planned_exercise_id TEXT NOT NULL REFERENCES planned_exercises(id) ON DELETE CASCADE,
                weight REAL,
                reps REAL,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_id ON workouts(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout_id ON workout_exercises(workout_id)",
            "CREATE INDEX IF NOT EXISTS idx_workout_sets_exercise_id ON workout_sets(workout_exercise_id)",
            "CREATE INDEX IF NOT EXISTS idx_planned_exercises_workout_id ON planned_exercises(workout_id)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(self.pool())
                .await
                .map_err(|e| AppError::database(format!("Failed to migrate workouts: {e}")))?;
        }
        Ok(())
    }
}

/// Workout graph queries over the pool
#[derive(Clone)]
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a workout and its whole child graph
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; the transaction is rolled back
    #[instrument(skip(self, workout), fields(workout_id = %workout.id))]
    pub async fn upsert(&self, user_id: Uuid, workout: &Workout) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let saved = sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, name, date, duration, notes, completed, planned)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                date = excluded.date,
                duration = excluded.duration,
                notes = excluded.notes,
                completed = excluded.completed,
                planned = excluded.planned,
                updated_at = CURRENT_TIMESTAMP
            WHERE workouts.user_id = excluded.user_id
            ",
        )
        .bind(workout.id.to_string())
        .bind(user_id.to_string())
        .bind(&workout.name)
        .bind(workout.date.to_rfc3339())
        .bind(workout.duration.map(|d| d as i64))
        .bind(&workout.notes)
        .bind(workout.completed)
        .bind(workout.planned)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save workout: {e}")))?;

        if saved.rows_affected() == 0 {
            return Err(AppError::locked(format!(
                "Workout {} belongs to another user",
                workout.id
            )));
        }

        Self::delete_children(&mut tx, workout.id).await?;
        Self::insert_exercises(&mut tx, workout).await?;
        Self::insert_planned_exercises(&mut tx, workout).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout: {e}")))?;

        debug!(
            exercises = workout.exercises.len(),
            planned = workout.planned_exercises.len(),
            "Workout graph saved"
        );
        Ok(())
    }

    async fn delete_children(tx: &mut Transaction<'_, Sqlite>, workout_id: Uuid) -> AppResult<()> {
        let id = workout_id.to_string();
        let statements = [
            r"
            DELETE FROM workout_sets WHERE workout_exercise_id IN
                (SELECT id FROM workout_exercises WHERE workout_id = $1)
            ",
            "DELETE FROM workout_exercises WHERE workout_id = $1",
            r"
            DELETE FROM planned_exercise_previous_sets WHERE planned_exercise_id IN
                (SELECT id FROM planned_exercises WHERE workout_id = $1)
            ",
            "DELETE FROM planned_exercises WHERE workout_id = $1",
        ];
        for statement in statements {
            sqlx::query(statement)
                .bind(&id)
                .execute(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to clear workout children: {e}")))?;
        }
        Ok(())
    }

    async fn insert_exercises(tx: &mut Transaction<'_, Sqlite>, workout: &Workout) -> AppResult<()> {
        for (position, instance) in workout.exercises.iter().enumerate() {
            let exercise = &instance.exercise;
            sqlx::query(
                r"
                INSERT INTO workout_exercises (
                    id, workout_id, exercise_id, exercise_name, exercise_type,
                    muscle_groups, instructions, custom, notes, sort_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ",
            )
            .bind(instance.id.to_string())
            .bind(workout.id.to_string())
            .bind(&exercise.id)
            .bind(&exercise.name)
            .bind(exercise.exercise_type.as_str())
            .bind(encode_muscle_groups(&exercise.muscle_groups)?)
            .bind(&exercise.instructions)
            .bind(exercise.custom)
            .bind(&instance.notes)
            .bind(position as i64)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save workout exercise: {e}")))?;

            for (set_position, set) in instance.sets.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO workout_sets (
                        id, workout_exercise_id, weight, reps, duration, distance, completed, sort_order
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    ",
                )
                .bind(set.id.to_string())
                .bind(instance.id.to_string())
                .bind(set.weight.as_ref().map(SetValue::to_storage_string))
                .bind(set.reps.as_ref().map(SetValue::to_storage_string))
                .bind(set.duration)
                .bind(set.distance)
                .bind(set.completed)
                .bind(set_position as i64)
                .execute(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to save workout set: {e}")))?;
            }
        }
        Ok(())
    }

    async fn insert_planned_exercises(
        tx: &mut Transaction<'_, Sqlite>,
        workout: &Workout,
    ) -> AppResult<()> {
        for (position, planned) in workout.planned_exercises.iter().enumerate() {
            let planned_id = Uuid::new_v4().to_string();
            let exercise = &planned.exercise;
            sqlx::query(
                r"
                INSERT INTO planned_exercises (
                    id, workout_id, exercise_id, exercise_name, exercise_type, muscle_groups,
                    instructions, custom, reference_weight, reference_reps, sort_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ",
            )
            .bind(&planned_id)
            .bind(workout.id.to_string())
            .bind(&exercise.id)
            .bind(&exercise.name)
            .bind(exercise.exercise_type.as_str())
            .bind(encode_muscle_groups(&exercise.muscle_groups)?)
            .bind(&exercise.instructions)
            .bind(exercise.custom)
            .bind(planned.reference_weight)
            .bind(planned.reference_reps)
            .bind(position as i64)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save planned exercise: {e}")))?;

            for (set_position, snapshot) in planned.previous_sets.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO planned_exercise_previous_sets (
                        id, planned_exercise_id, weight, reps, sort_order
                    ) VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&planned_id)
                .bind(snapshot.weight)
                .bind(snapshot.reps)
                .bind(set_position as i64)
                .execute(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to save previous set: {e}")))?;
            }
        }
        Ok(())
    }

    /// All workouts for a user, oldest first, with their child graphs
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be decoded
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        self.load(user_id, None).await
    }

    /// One workout by id
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be decoded
    pub async fn get(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<Option<Workout>> {
        Ok(self.load(user_id, Some(workout_id)).await?.into_iter().next())
    }

    async fn load(&self, user_id: Uuid, workout_id: Option<Uuid>) -> AppResult<Vec<Workout>> {
        let user = user_id.to_string();
        let only = workout_id.map(|id| id.to_string());

        let workout_rows = sqlx::query(
            r"
            SELECT id, name, date, duration, notes, completed, planned
            FROM workouts
            WHERE user_id = $1 AND ($2 IS NULL OR id = $2)
            ORDER BY date ASC, created_at ASC
            ",
        )
        .bind(&user)
        .bind(&only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        let exercise_rows = sqlx::query(
            r"
            SELECT e.* FROM workout_exercises e
            JOIN workouts w ON e.workout_id = w.id
            WHERE w.user_id = $1 AND ($2 IS NULL OR w.id = $2)
            ORDER BY e.workout_id, e.sort_order
            ",
        )
        .bind(&user)
        .bind(&only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout exercises: {e}")))?;

        let set_rows = sqlx::query(
            r"
            SELECT s.* FROM workout_sets s
            JOIN workout_exercises e ON s.workout_exercise_id = e.id
            JOIN workouts w ON e.workout_id = w.id
            WHERE w.user_id = $1 AND ($2 IS NULL OR w.id = $2)
            ORDER BY s.workout_exercise_id, s.sort_order
            ",
        )
        .bind(&user)
        .bind(&only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout sets: {e}")))?;

        let planned_rows = sqlx::query(
            r"
            SELECT p.* FROM planned_exercises p
            JOIN workouts w ON p.workout_id = w.id
            WHERE w.user_id = $1 AND ($2 IS NULL OR w.id = $2)
            ORDER BY p.workout_id, p.sort_order
            ",
        )
        .bind(&user)
        .bind(&only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list planned exercises: {e}")))?;

        let previous_rows = sqlx::query(
            r"
            SELECT ps.* FROM planned_exercise_previous_sets ps
            JOIN planned_exercises p ON ps.planned_exercise_id = p.id
            JOIN workouts w ON p.workout_id = w.id
            WHERE w.user_id = $1 AND ($2 IS NULL OR w.id = $2)
            ORDER BY ps.planned_exercise_id, ps.sort_order
            ",
        )
        .bind(&user)
        .bind(&only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list previous sets: {e}")))?;

        let mut previous_by_plan: HashMap<String, Vec<PreviousSet>> = HashMap::new();
        for row in &previous_rows {
            let plan_id: String = row.get("planned_exercise_id");
            previous_by_plan.entry(plan_id).or_default().push(PreviousSet {
                weight: row.get("weight"),
                reps: row.get("reps"),
            });
        }

        let mut plans_by_workout: HashMap<String, Vec<PlannedExercise>> = HashMap::new();
        for row in &planned_rows {
            let plan_id: String = row.get("id");
            let workout_key: String = row.get("workout_id");
            plans_by_workout
                .entry(workout_key)
                .or_default()
                .push(PlannedExercise {
                    exercise: row_to_exercise(row)?,
                    reference_weight: row.get("reference_weight"),
                    reference_reps: row.get("reference_reps"),
                    previous_sets: previous_by_plan.remove(&plan_id).unwrap_or_default(),
                });
        }

        let mut sets_by_exercise: HashMap<String, Vec<SqliteRow>> = HashMap::new();
        for row in set_rows {
            let owner: String = row.get("workout_exercise_id");
            sets_by_exercise.entry(owner).or_default().push(row);
        }

        let mut exercises_by_workout: HashMap<String, Vec<WorkoutExercise>> = HashMap::new();
        for row in &exercise_rows {
            let instance_id: String = row.get("id");
            let workout_key: String = row.get("workout_id");
            let exercise = row_to_exercise(row)?;
            let sets = sets_by_exercise
                .remove(&instance_id)
                .unwrap_or_default()
                .iter()
                .map(|set_row| row_to_set(set_row, &exercise.id))
                .collect::<AppResult<Vec<_>>>()?;
            exercises_by_workout
                .entry(workout_key)
                .or_default()
                .push(WorkoutExercise {
                    id: parse_uuid(&instance_id, "workout_exercises.id")?,
                    exercise,
                    sets,
                    notes: row.get("notes"),
                });
        }

        workout_rows
            .iter()
            .map(|row| {
                let id: String = row.get("id");
                let mut workout = row_to_workout(row)?;
                workout.exercises = exercises_by_workout.remove(&id).unwrap_or_default();
                workout.planned_exercises = plans_by_workout.remove(&id).unwrap_or_default();
                Ok(workout)
            })
            .collect()
    }

    /// Delete a workout and its children
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        Self::delete_children(&mut tx, workout_id).await?;
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        if result.rows_affected() == 0 {
            // Not ours: keep the children we just cleared
            tx.rollback()
                .await
                .map_err(|e| AppError::database(format!("Failed to roll back: {e}")))?;
            return Ok(false);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;
        Ok(true)
    }

    /// Set the notes of an exercise instance
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_exercise_notes(
        &self,
        user_id: Uuid,
        workout_exercise_id: Uuid,
        notes: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE workout_exercises SET notes = $1
            WHERE id = $2 AND workout_id IN (SELECT id FROM workouts WHERE user_id = $3)
            ",
        )
        .bind(notes)
        .bind(workout_exercise_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update exercise notes: {e}")))?;

        Ok(result.rows_affected())
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id: String = row.get("id");
    let date: String = row.get("date");
    let duration: Option<i64> = row.get("duration");

    Ok(Workout {
        id: parse_uuid(&id, "workouts.id")?,
        name: row.get("name"),
        exercises: Vec::new(),
        date: parse_timestamp(&date, "workouts.date")?,
        duration: duration.map(|d| d.max(0) as u64),
        notes: row.get("notes"),
        completed: row.get("completed"),
        planned: row.get("planned"),
        planned_exercises: Vec::new(),
    })
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let exercise_type: String = row.get("exercise_type");
    let muscle_groups: String = row.get("muscle_groups");

    Ok(Exercise {
        id: row.get("exercise_id"),
        name: row.get("exercise_name"),
        exercise_type: ExerciseType::parse(&exercise_type),
        muscle_groups: decode_muscle_groups(&muscle_groups)?,
        instructions: row.get("instructions"),
        custom: row.get("custom"),
    })
}

fn row_to_set(row: &SqliteRow, exercise_id: &str) -> AppResult<WorkoutSet> {
    let id: String = row.get("id");
    let weight: Option<String> = row.get("weight");
    let reps: Option<String> = row.get("reps");

    Ok(WorkoutSet {
        id: parse_uuid(&id, "workout_sets.id")?,
        exercise_id: exercise_id.to_owned(),
        weight: weight.as_deref().map(SetValue::from_storage_string),
        reps: reps.as_deref().map(SetValue::from_storage_string),
        duration: row.get("duration"),
        distance: row.get("distance"),
        completed: row.get("completed"),
    })
}
