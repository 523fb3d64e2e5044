// ABOUTME: Database operations for health goals and their dated entries
// ABOUTME: Entries upsert on (goal_id, entry_date) so each goal has one entry per day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use ironlog_core::models::{HealthEntry, HealthGoal, HealthGoalFrequency, HealthGoalType};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::instrument;
use uuid::Uuid;

/// Calendar-day column format
const DATE_FORMAT: &str = "%Y-%m-%d";

impl Database {
    /// Create health tracking tables
    pub(super) async fn migrate_health(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS health_goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                goal_type TEXT NOT NULL DEFAULT 'custom',
                frequency TEXT NOT NULL DEFAULT 'daily' CHECK (frequency IN ('daily', 'weekly')),
                target REAL,
                unit TEXT,
                emoji TEXT,
                description TEXT,
                active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS health_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                goal_id TEXT NOT NULL REFERENCES health_goals(id) ON DELETE CASCADE,
                entry_date TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                value REAL,
                notes TEXT,
                completed_at TEXT,
                UNIQUE (goal_id, entry_date)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_health_goals_user_id ON health_goals(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_health_entries_user_date ON health_entries(user_id, entry_date)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(self.pool())
                .await
                .map_err(|e| AppError::database(format!("Failed to migrate health tables: {e}")))?;
        }
        Ok(())
    }
}

/// Health goal and entry queries over the pool
#[derive(Clone)]
pub struct HealthManager {
    pool: SqlitePool,
}

impl HealthManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or update a goal
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    #[instrument(skip(self, goal), fields(goal_id = %goal.id))]
    pub async fn upsert_goal(&self, user_id: Uuid, goal: &HealthGoal) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO health_goals (
                id, user_id, name, goal_type, frequency, target, unit, emoji,
                description, active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                goal_type = excluded.goal_type,
                frequency = excluded.frequency,
                target = excluded.target,
                unit = excluded.unit,
                emoji = excluded.emoji,
                description = excluded.description,
                active = excluded.active
            WHERE health_goals.user_id = excluded.user_id
            ",
        )
        .bind(goal.id.to_string())
        .bind(user_id.to_string())
        .bind(&goal.name)
        .bind(goal.goal_type.as_str())
        .bind(goal.frequency.as_str())
        .bind(goal.target)
        .bind(&goal.unit)
        .bind(&goal.emoji)
        .bind(&goal.description)
        .bind(goal.active)
        .bind(goal.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save health goal: {e}")))?;
        Ok(())
    }

    /// All goals for a user in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_goals(&self, user_id: Uuid) -> AppResult<Vec<HealthGoal>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, goal_type, frequency, target, unit, emoji, description, active, created_at
            FROM health_goals
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health goals: {e}")))?;

        rows.iter().map(row_to_goal).collect()
    }

    /// Delete a goal together with all of its entries
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    #[instrument(skip(self))]
    pub async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM health_entries WHERE goal_id = $1 AND user_id = $2")
            .bind(goal_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete health entries: {e}")))?;

        let result = sqlx::query("DELETE FROM health_goals WHERE id = $1 AND user_id = $2")
            .bind(goal_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete health goal: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit goal delete: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert or update the entry for `(goal_id, date)`
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    #[instrument(skip(self, entry), fields(goal_id = %entry.goal_id, date = %entry.date))]
    pub async fn upsert_entry(&self, user_id: Uuid, entry: &HealthEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO health_entries (
                id, user_id, goal_id, entry_date, completed, value, notes, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(goal_id, entry_date) DO UPDATE SET
                completed = excluded.completed,
                value = excluded.value,
                notes = excluded.notes,
                completed_at = excluded.completed_at
            ",
        )
        .bind(entry.id.to_string())
        .bind(user_id.to_string())
        .bind(entry.goal_id.to_string())
        .bind(entry.date.format(DATE_FORMAT).to_string())
        .bind(entry.completed)
        .bind(entry.value)
        .bind(&entry.notes)
        .bind(entry.completed_at.map(|at| at.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save health entry: {e}")))?;
        Ok(())
    }

    /// All entries for a user ordered by date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_entries(&self, user_id: Uuid) -> AppResult<Vec<HealthEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, goal_id, entry_date, completed, value, notes, completed_at
            FROM health_entries
            WHERE user_id = $1
            ORDER BY entry_date ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health entries: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_goal(row: &SqliteRow) -> AppResult<HealthGoal> {
    let id: String = row.get("id");
    let goal_type: String = row.get("goal_type");
    let frequency: String = row.get("frequency");
    let created_at: String = row.get("created_at");

    Ok(HealthGoal {
        id: parse_uuid(&id, "health_goals.id")?,
        name: row.get("name"),
        goal_type: HealthGoalType::parse(&goal_type),
        frequency: HealthGoalFrequency::parse(&frequency),
        target: row.get("target"),
        unit: row.get("unit"),
        emoji: row.get("emoji"),
        description: row.get("description"),
        active: row.get("active"),
        created_at: parse_timestamp(&created_at, "health_goals.created_at")?,
    })
}

fn row_to_entry(row: &SqliteRow) -> AppResult<HealthEntry> {
    let id: String = row.get("id");
    let goal_id: String = row.get("goal_id");
    let date: String = row.get("entry_date");
    let completed_at: Option<String> = row.get("completed_at");

    Ok(HealthEntry {
        id: parse_uuid(&id, "health_entries.id")?,
        goal_id: parse_uuid(&goal_id, "health_entries.goal_id")?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| AppError::database(format!("Invalid date in health_entries: {e}")))?,
        completed: row.get("completed"),
        value: row.get("value"),
        notes: row.get("notes"),
        completed_at: completed_at
            .as_deref()
            .map(|raw| parse_timestamp(raw, "health_entries.completed_at"))
            .transpose()?,
    })
}
