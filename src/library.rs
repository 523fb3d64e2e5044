// ABOUTME: Exercise library combining the built-in catalog with user-created exercises
// ABOUTME: Search, muscle group lookup and validated custom exercise creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::{load_json, save_json, LocalStorage};
use crate::database::repositories::ExerciseRepository;
use crate::errors::{AppError, AppResult};
use crate::sync::{SyncHandle, SyncOperation};
use ironlog_core::catalog::{builtin_exercises, is_builtin_id};
use ironlog_core::constants::storage_keys;
use ironlog_core::models::{Exercise, ExerciseType};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Built-in catalog plus custom exercises
pub struct ExerciseLibrary {
    storage: Arc<dyn LocalStorage>,
    sync: SyncHandle,
    catalog: Vec<Exercise>,
    custom: Vec<Exercise>,
}

impl ExerciseLibrary {
    /// Load custom exercises from the local cache
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read or decoded
    pub fn open_local(storage: Arc<dyn LocalStorage>) -> AppResult<Self> {
        let custom: Vec<Exercise> =
            load_json(storage.as_ref(), storage_keys::CUSTOM_EXERCISES)?.unwrap_or_default();
        Ok(Self::with_custom(storage, SyncHandle::disabled(), custom))
    }

    /// Load custom exercises for `user_id` from the remote store
    ///
    /// # Errors
    ///
    /// Returns an error if the remote list cannot be loaded
    pub async fn open_remote(
        storage: Arc<dyn LocalStorage>,
        repository: &dyn ExerciseRepository,
        user_id: Uuid,
        sync: SyncHandle,
    ) -> AppResult<Self> {
        let custom = repository
            .list_custom_exercises(user_id)
            .await
            .map_err(AppError::from)?;
        Ok(Self::with_custom(storage, sync, custom))
    }

    fn with_custom(storage: Arc<dyn LocalStorage>, sync: SyncHandle, custom: Vec<Exercise>) -> Self {
        let catalog = builtin_exercises();
        info!(
            builtin = catalog.len(),
            custom = custom.len(),
            "Loaded exercise library"
        );
        Self {
            storage,
            sync,
            catalog,
            custom,
        }
    }

    /// Catalog entries followed by custom ones
    #[must_use]
    pub fn all(&self) -> Vec<&Exercise> {
        self.catalog.iter().chain(&self.custom).collect()
    }

    /// Custom exercises in creation order
    #[must_use]
    pub fn custom(&self) -> &[Exercise] {
        &self.custom
    }

    /// Exercise by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Exercise> {
        self.catalog.iter().chain(&self.custom).find(|e| e.id == id)
    }

    /// Case-insensitive substring match on name or muscle group
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Exercise> {
        let query = query.trim();
        if query.is_empty() {
            return self.all();
        }
        self.catalog
            .iter()
            .chain(&self.custom)
            .filter(|e| e.matches_query(query))
            .collect()
    }

    /// Exercises tagged with `group`
    #[must_use]
    pub fn by_muscle_group(&self, group: &str) -> Vec<&Exercise> {
        self.catalog
            .iter()
            .chain(&self.custom)
            .filter(|e| e.targets(group))
            .collect()
    }

    /// Every muscle group tag in use, lowercased and sorted
    #[must_use]
    pub fn muscle_groups(&self) -> Vec<String> {
        self.catalog
            .iter()
            .chain(&self.custom)
            .flat_map(|e| e.muscle_groups.iter().map(|m| m.to_lowercase()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Create a custom exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name and `ResourceAlreadyExists` when
    /// the name matches an existing exercise ignoring case
    pub fn add_custom(
        &mut self,
        name: &str,
        exercise_type: ExerciseType,
        muscle_groups: Vec<String>,
        instructions: Option<String>,
    ) -> AppResult<Exercise> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Exercise name must not be empty"));
        }
        let folded = name.to_lowercase();
        if self
            .catalog
            .iter()
            .chain(&self.custom)
            .any(|e| e.name.to_lowercase() == folded)
        {
            return Err(AppError::already_exists(format!("Exercise '{name}'")));
        }

        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            exercise_type,
            muscle_groups: muscle_groups
                .into_iter()
                .map(|m| m.trim().to_owned())
                .filter(|m| !m.is_empty())
                .collect(),
            instructions: instructions.filter(|i| !i.trim().is_empty()),
            custom: true,
        };
        info!(exercise_id = %exercise.id, name = %exercise.name, "Created custom exercise");
        self.custom.push(exercise.clone());
        self.persist();
        self.sync
            .dispatch(SyncOperation::SaveCustomExercise(exercise.clone()));
        Ok(exercise)
    }

    /// Remove a custom exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a built-in id and `ResourceNotFound` for an
    /// unknown one
    pub fn delete_custom(&mut self, id: &str) -> AppResult<()> {
        if is_builtin_id(id) {
            return Err(AppError::invalid_input(format!(
                "Built-in exercise {id} cannot be deleted"
            ))
            .with_resource_id(id));
        }
        let Some(index) = self.custom.iter().position(|e| e.id == id) else {
            return Err(AppError::not_found(format!("Exercise {id}")).with_resource_id(id));
        };
        self.custom.remove(index);
        info!(exercise_id = %id, "Deleted custom exercise");
        self.persist();
        self.sync
            .dispatch(SyncOperation::DeleteCustomExercise(id.to_owned()));
        Ok(())
    }

    // Local copy is kept in both modes so the library opens offline.
    fn persist(&self) {
        if let Err(e) = save_json(
            self.storage.as_ref(),
            storage_keys::CUSTOM_EXERCISES,
            &self.custom,
        ) {
            warn!(error = %e, "Failed to persist custom exercises");
        }
    }
}

impl std::fmt::Debug for ExerciseLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseLibrary")
            .field("builtin", &self.catalog.len())
            .field("custom", &self.custom.len())
            .finish_non_exhaustive()
    }
}
