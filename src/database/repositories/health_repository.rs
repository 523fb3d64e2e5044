// ABOUTME: Health repository implementation
// ABOUTME: Adapts HealthManager results to repository-layer errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::HealthRepository;
use crate::database::Database;
use crate::errors::DatabaseError;
use async_trait::async_trait;
use ironlog_core::models::{HealthEntry, HealthGoal};
use uuid::Uuid;

/// SQLite implementation of `HealthRepository`
pub struct HealthRepositoryImpl {
    db: Database,
}

impl HealthRepositoryImpl {
    /// Create a new `HealthRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthRepository for HealthRepositoryImpl {
    async fn save_goal(&self, user_id: Uuid, goal: &HealthGoal) -> Result<(), DatabaseError> {
        self.db
            .health()
            .upsert_goal(user_id, goal)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_goals(&self, user_id: Uuid) -> Result<Vec<HealthGoal>, DatabaseError> {
        self.db
            .health()
            .list_goals(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<bool, DatabaseError> {
        self.db
            .health()
            .delete_goal(user_id, goal_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn save_entry(&self, user_id: Uuid, entry: &HealthEntry) -> Result<(), DatabaseError> {
        self.db
            .health()
            .upsert_entry(user_id, entry)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<HealthEntry>, DatabaseError> {
        self.db
            .health()
            .list_entries(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
