// ABOUTME: Write-behind worker applying local mutations to the remote store
// ABOUTME: Fire-and-forget dispatch over a bounded channel; failures are logged, never retried
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Remote Sync
//!
//! Stores update their local state first and then hand a [`SyncOperation`] to a
//! [`SyncHandle`]. A single [`SyncWorker`] task applies operations in dispatch
//! order. A failed operation is logged at `warn` and dropped, which can leave the
//! remote store behind the local state until the next successful write of the
//! same record.

use crate::config::SyncConfig;
use crate::database::repositories::Repositories;
use crate::errors::DatabaseError;
use ironlog_core::models::{Exercise, HealthEntry, HealthGoal, Workout};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One remote write
#[derive(Debug, Clone)]
pub enum SyncOperation {
    /// Insert or replace a workout graph
    SaveWorkout(Box<Workout>),
    /// Remove a workout
    DeleteWorkout(Uuid),
    /// Replace the notes of an exercise instance
    UpdateExerciseNotes {
        /// Exercise instance id
        workout_exercise_id: Uuid,
        /// New notes
        notes: Option<String>,
    },
    /// Insert or update a health goal
    SaveHealthGoal(HealthGoal),
    /// Remove a health goal and its entries
    DeleteHealthGoal(Uuid),
    /// Upsert a health entry
    SaveHealthEntry(HealthEntry),
    /// Insert a custom exercise
    SaveCustomExercise(Exercise),
    /// Remove a custom exercise
    DeleteCustomExercise(String),
}

impl SyncOperation {
    /// Short label for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SaveWorkout(_) => "save_workout",
            Self::DeleteWorkout(_) => "delete_workout",
            Self::UpdateExerciseNotes { .. } => "update_exercise_notes",
            Self::SaveHealthGoal(_) => "save_health_goal",
            Self::DeleteHealthGoal(_) => "delete_health_goal",
            Self::SaveHealthEntry(_) => "save_health_entry",
            Self::SaveCustomExercise(_) => "save_custom_exercise",
            Self::DeleteCustomExercise(_) => "delete_custom_exercise",
        }
    }
}

enum Message {
    Apply(SyncOperation),
    Flush(oneshot::Sender<()>),
}

/// Counters reported when the worker stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Operations that reached the remote store
    pub applied: u64,
    /// Operations that failed and were dropped
    pub failed: u64,
}

/// Cheap cloneable sender side of the sync worker
///
/// A disabled handle accepts and discards everything, which is how local-only
/// mode runs.
#[derive(Debug, Clone, Default)]
pub struct SyncHandle {
    sender: Option<mpsc::Sender<Message>>,
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apply(op) => write!(f, "Apply({})", op.kind()),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

impl SyncHandle {
    /// Handle that drops every operation
    #[must_use]
    pub const fn disabled() -> Self {
        Self { sender: None }
    }

    /// Whether operations reach a worker
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queue `operation` without waiting
    ///
    /// Never blocks and never fails: a full or closed queue is logged and the
    /// operation is dropped.
    pub fn dispatch(&self, operation: SyncOperation) {
        let Some(sender) = &self.sender else {
            return;
        };
        let kind = operation.kind();
        match sender.try_send(Message::Apply(operation)) {
            Ok(()) => debug!(operation = kind, "Queued remote write"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(operation = kind, "Sync queue full, dropping remote write");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(operation = kind, "Sync worker stopped, dropping remote write");
            }
        }
    }

    /// Wait until every operation dispatched before this call has been applied
    pub async fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (done_tx, done_rx) = oneshot::channel();
        if sender.send(Message::Flush(done_tx)).await.is_err() {
            debug!("Sync worker already stopped, nothing to flush");
            return;
        }
        if done_rx.await.is_err() {
            debug!("Sync worker stopped before acknowledging flush");
        }
    }
}

/// Task applying queued operations against the repositories
pub struct SyncWorker {
    receiver: mpsc::Receiver<Message>,
    repositories: Repositories,
    user_id: Uuid,
    stats: SyncStats,
}

impl SyncWorker {
    /// Spawn a worker writing as `user_id`
    ///
    /// Must be called from within a Tokio runtime. The worker stops once every
    /// handle has been dropped and returns its counters.
    #[must_use]
    pub fn spawn(
        repositories: Repositories,
        user_id: Uuid,
        config: &SyncConfig,
    ) -> (SyncHandle, JoinHandle<SyncStats>) {
        if !config.enabled {
            info!("Remote sync disabled by configuration");
            return (SyncHandle::disabled(), tokio::spawn(async { SyncStats::default() }));
        }

        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let worker = Self {
            receiver,
            repositories,
            user_id,
            stats: SyncStats::default(),
        };
        info!(%user_id, capacity = config.queue_capacity, "Starting sync worker");
        let task = tokio::spawn(worker.run());
        (
            SyncHandle {
                sender: Some(sender),
            },
            task,
        )
    }

    async fn run(mut self) -> SyncStats {
        while let Some(message) = self.receiver.recv().await {
            match message {
                Message::Apply(operation) => {
                    let kind = operation.kind();
                    match self.apply(operation).await {
                        Ok(()) => {
                            self.stats.applied += 1;
                            debug!(operation = kind, "Remote write applied");
                        }
                        Err(e) => {
                            self.stats.failed += 1;
                            warn!(operation = kind, error = %e, "Remote write failed");
                        }
                    }
                }
                Message::Flush(done) => {
                    // Receiver may have given up waiting
                    let _ = done.send(());
                }
            }
        }
        info!(
            applied = self.stats.applied,
            failed = self.stats.failed,
            "Sync worker stopped"
        );
        self.stats
    }

    async fn apply(&self, operation: SyncOperation) -> Result<(), DatabaseError> {
        let user_id = self.user_id;
        let repos = &self.repositories;
        match operation {
            SyncOperation::SaveWorkout(workout) => {
                repos.workouts.save_workout(user_id, &workout).await
            }
            SyncOperation::DeleteWorkout(id) => {
                repos.workouts.delete_workout(user_id, id).await.map(drop)
            }
            SyncOperation::UpdateExerciseNotes {
                workout_exercise_id,
                notes,
            } => {
                repos
                    .workouts
                    .update_exercise_notes(user_id, workout_exercise_id, notes)
                    .await
            }
            SyncOperation::SaveHealthGoal(goal) => repos.health.save_goal(user_id, &goal).await,
            SyncOperation::DeleteHealthGoal(id) => {
                repos.health.delete_goal(user_id, id).await.map(drop)
            }
            SyncOperation::SaveHealthEntry(entry) => {
                repos.health.save_entry(user_id, &entry).await
            }
            SyncOperation::SaveCustomExercise(exercise) => {
                repos
                    .exercises
                    .save_custom_exercise(user_id, &exercise)
                    .await
            }
            SyncOperation::DeleteCustomExercise(id) => repos
                .exercises
                .delete_custom_exercise(user_id, &id)
                .await
                .map(drop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_handle_discards_operations() {
        let handle = SyncHandle::disabled();
        assert!(!handle.is_enabled());
        handle.dispatch(SyncOperation::DeleteWorkout(Uuid::new_v4()));
        handle.flush().await;
    }
}
