// ABOUTME: Repository traits over the remote store, one per domain
// ABOUTME: Sync and migration depend on these seams instead of the concrete managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! Each trait is implemented by a `*RepositoryImpl` adapter over [`Database`].
//! [`Repositories`] bundles the three behind `Arc<dyn _>` so callers can swap in
//! other backends.

mod exercise_repository;
mod health_repository;
mod workout_repository;

pub use exercise_repository::ExerciseRepositoryImpl;
pub use health_repository::HealthRepositoryImpl;
pub use workout_repository::WorkoutRepositoryImpl;

use super::Database;
use crate::errors::DatabaseError;
use async_trait::async_trait;
use ironlog_core::models::{Exercise, HealthEntry, HealthGoal, Workout};
use std::sync::Arc;
use uuid::Uuid;

/// Workout graph persistence
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Insert or replace a workout with all of its children
    async fn save_workout(&self, user_id: Uuid, workout: &Workout) -> Result<(), DatabaseError>;

    /// All workouts for a user, oldest first
    async fn list_workouts(&self, user_id: Uuid) -> Result<Vec<Workout>, DatabaseError>;

    /// Remove a workout; `false` when nothing matched
    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool, DatabaseError>;

    /// Replace the notes of one exercise instance
    async fn update_exercise_notes(
        &self,
        user_id: Uuid,
        workout_exercise_id: Uuid,
        notes: Option<String>,
    ) -> Result<(), DatabaseError>;
}

/// Health goal and entry persistence
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Insert or update a goal
    async fn save_goal(&self, user_id: Uuid, goal: &HealthGoal) -> Result<(), DatabaseError>;

    /// All goals in creation order
    async fn list_goals(&self, user_id: Uuid) -> Result<Vec<HealthGoal>, DatabaseError>;

    /// Remove a goal and its entries
    async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<bool, DatabaseError>;

    /// Insert or update the entry for its `(goal_id, date)` pair
    async fn save_entry(&self, user_id: Uuid, entry: &HealthEntry) -> Result<(), DatabaseError>;

    /// All entries ordered by date
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<HealthEntry>, DatabaseError>;
}

/// Custom exercise persistence
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Insert a custom exercise
    async fn save_custom_exercise(
        &self,
        user_id: Uuid,
        exercise: &Exercise,
    ) -> Result<(), DatabaseError>;

    /// All custom exercises in creation order
    async fn list_custom_exercises(&self, user_id: Uuid) -> Result<Vec<Exercise>, DatabaseError>;

    /// Remove a custom exercise
    async fn delete_custom_exercise(
        &self,
        user_id: Uuid,
        exercise_id: &str,
    ) -> Result<bool, DatabaseError>;
}

/// The three repositories used by sync and migration
#[derive(Clone)]
pub struct Repositories {
    /// Workouts
    pub workouts: Arc<dyn WorkoutRepository>,
    /// Health goals and entries
    pub health: Arc<dyn HealthRepository>,
    /// Custom exercises
    pub exercises: Arc<dyn ExerciseRepository>,
}

impl Repositories {
    /// Repositories backed by `db`
    #[must_use]
    pub fn from_database(db: &Database) -> Self {
        Self {
            workouts: Arc::new(WorkoutRepositoryImpl::new(db.clone())),
            health: Arc::new(HealthRepositoryImpl::new(db.clone())),
            exercises: Arc::new(ExerciseRepositoryImpl::new(db.clone())),
        }
    }
}
