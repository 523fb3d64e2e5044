// ABOUTME: Remote relational store for workouts, health tracking and custom exercises
// ABOUTME: SQLite connection pool, schema migration and per-domain query managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The remote store keeps one row per record, keyed by `user_id`. Child tables
//! carry a `sort_order` column which is the only source of sequence information:
//!
//! - `workouts` → `workout_exercises` → `workout_sets`
//! - `workouts` → `planned_exercises` → `planned_exercise_previous_sets`
//! - `health_goals` → `health_entries`
//! - `custom_exercises`

mod exercises;
mod health;
mod workouts;

/// Repository traits over the query managers
pub mod repositories;

pub use exercises::CustomExerciseManager;
pub use health::HealthManager;
pub use workouts::WorkoutManager;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::fs;
use tracing::{debug, info};

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and create all tables
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let db = Self::connect(database_url).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Connect using typed configuration, migrating when `auto_migrate` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory, the connection or the migration fails
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = &config.url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        let db = Self::connect(&config.url.to_connection_string()).await?;
        if config.auto_migrate {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Open the pool without touching the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let is_memory = database_url.contains(":memory:");

        // An in-memory database exists per connection, so the pool must hold exactly one
        let pool = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            let connection_options = if database_url.starts_with("sqlite:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };
            SqlitePool::connect(&connection_options).await
        }
        .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        debug!(url = database_url, "Database pool opened");
        Ok(Self { pool })
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_workouts().await?;
        self.migrate_health().await?;
        self.migrate_custom_exercises().await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Workout graph queries
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }

    /// Health goal and entry queries
    #[must_use]
    pub fn health(&self) -> HealthManager {
        HealthManager::new(self.pool.clone())
    }

    /// Custom exercise queries
    #[must_use]
    pub fn custom_exercises(&self) -> CustomExerciseManager {
        CustomExerciseManager::new(self.pool.clone())
    }
}

fn parse_uuid(raw: &str, column: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in {column}: {e}")))
}

fn parse_timestamp(raw: &str, column: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in {column}: {e}")))
}

fn encode_muscle_groups(groups: &[String]) -> AppResult<String> {
    Ok(serde_json::to_string(groups)?)
}

fn decode_muscle_groups(raw: &str) -> AppResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}
