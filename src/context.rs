// ABOUTME: Application context wiring configuration into the stores and sync worker
// ABOUTME: Chooses local-only or remote mode from the configured identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::{open_storage, LocalStorage};
use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::database::repositories::Repositories;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::health::HealthStore;
use crate::library::ExerciseLibrary;
use crate::migration::{is_migrated, migrate_to_remote, LegacyData, MigrationReport};
use crate::store::WorkoutStore;
use crate::sync::{SyncHandle, SyncStats, SyncWorker};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

/// Everything a session needs, opened from [`AppConfig`]
pub struct AppContext {
    /// Workout state and history
    pub workouts: WorkoutStore,
    /// Health goals and entries
    pub health: HealthStore,
    /// Catalog and custom exercises
    pub library: ExerciseLibrary,
    /// Result of the sign-in migration, when one ran
    pub migration: Option<MigrationReport>,
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    user_id: Option<Uuid>,
    sync: SyncHandle,
    worker: Option<JoinHandle<SyncStats>>,
}

impl AppContext {
    /// Open the local cache and, with an identity, the remote store
    ///
    /// With a user id, local-only data that has not been migrated yet is
    /// uploaded before the stores load their remote state.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be opened, the database cannot be
    /// reached, or initial state cannot be loaded
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let storage = open_storage(&config.storage, config.environment)?;
        let clock: Arc<dyn Clock> = Arc::new(
            config
                .clock
                .utc_offset
                .map_or_else(SystemClock::new, SystemClock::with_offset),
        );

        match config.identity.user_id {
            None => Self::open_local(storage, clock),
            Some(user_id) => {
                let database = Database::from_config(&config.database).await?;
                let repositories = Repositories::from_database(&database);
                Self::open_remote(storage, clock, repositories, user_id, config).await
            }
        }
    }

    /// Local-only session
    ///
    /// # Errors
    ///
    /// Returns an error if a stored document cannot be decoded
    pub fn open_local(storage: Arc<dyn LocalStorage>, clock: Arc<dyn Clock>) -> AppResult<Self> {
        info!("Opening local-only session");
        Ok(Self {
            workouts: WorkoutStore::open_local(storage.clone(), clock.clone())?,
            health: HealthStore::open_local(storage.clone(), clock.clone())?,
            library: ExerciseLibrary::open_local(storage.clone())?,
            migration: None,
            storage,
            clock,
            user_id: None,
            sync: SyncHandle::disabled(),
            worker: None,
        })
    }

    /// Remote session for `user_id` over `repositories`
    ///
    /// # Errors
    ///
    /// Returns an error if local data cannot be read or remote state cannot be
    /// loaded
    pub async fn open_remote(
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        repositories: Repositories,
        user_id: Uuid,
        config: &AppConfig,
    ) -> AppResult<Self> {
        info!(%user_id, "Opening remote session");

        let migration = if !is_migrated(storage.as_ref())?
            && LegacyData::load(storage.as_ref())?.has_local_data()
        {
            Some(migrate_to_remote(storage.as_ref(), &repositories, user_id).await?)
        } else {
            None
        };

        let (sync, worker) = SyncWorker::spawn(repositories.clone(), user_id, &config.sync);

        let workouts = WorkoutStore::open_remote(
            storage.clone(),
            clock.clone(),
            repositories.workouts.as_ref(),
            user_id,
            sync.clone(),
        )
        .await?;
        let health = HealthStore::open_remote(
            storage.clone(),
            clock.clone(),
            repositories.health.as_ref(),
            user_id,
            sync.clone(),
        )
        .await?;
        let library = ExerciseLibrary::open_remote(
            storage.clone(),
            repositories.exercises.as_ref(),
            user_id,
            sync.clone(),
        )
        .await?;

        Ok(Self {
            workouts,
            health,
            library,
            migration,
            storage,
            clock,
            user_id: Some(user_id),
            sync,
            worker: Some(worker),
        })
    }

    /// The local cache
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    /// The session clock
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Signed-in user, `None` for a local-only session
    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Whether state was loaded from the remote store
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.user_id.is_some()
    }

    /// Whether writes are forwarded to the remote store
    #[must_use]
    pub const fn is_syncing(&self) -> bool {
        self.sync.is_enabled()
    }

    /// Wait for every queued remote write to be applied
    pub async fn flush(&self) {
        self.sync.flush().await;
    }

    /// Drop the stores and wait for the sync worker to drain
    ///
    /// # Errors
    ///
    /// Returns an error if the worker task panicked
    pub async fn shutdown(self) -> AppResult<SyncStats> {
        let Self {
            workouts,
            health,
            library,
            sync,
            worker,
            ..
        } = self;
        // Every handle must be gone before the worker loop can end
        drop((workouts, health, library, sync));
        let Some(worker) = worker else {
            return Ok(SyncStats::default());
        };
        worker
            .await
            .map_err(|e| AppError::internal(format!("Sync worker failed: {e}")))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("workouts", &self.workouts)
            .field("health", &self.health)
            .field("library", &self.library)
            .field("user_id", &self.user_id)
            .field("syncing", &self.is_syncing())
            .finish_non_exhaustive()
    }
}
