// ABOUTME: Local storage factory for environment-based backend selection
// ABOUTME: Testing environments get in-memory storage, everything else the data directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{FileStorage, InMemoryStorage, LocalStorage};
use crate::config::{Environment, StorageConfig};
use crate::errors::AppResult;
use std::sync::Arc;
use tracing::info;

/// Open the local storage backend for `environment`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created
pub fn open_storage(
    config: &StorageConfig,
    environment: Environment,
) -> AppResult<Arc<dyn LocalStorage>> {
    if environment.is_testing() {
        info!("Initializing in-memory local storage");
        return Ok(Arc::new(InMemoryStorage::new()));
    }

    info!(
        "Initializing file local storage at {}",
        config.data_dir.display()
    );
    Ok(Arc::new(FileStorage::open(&config.data_dir)?))
}
