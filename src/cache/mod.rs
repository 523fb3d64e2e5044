// ABOUTME: Local ephemeral key-value cache abstraction with pluggable backends
// ABOUTME: Holds the in-progress workout and legacy local-only data as JSON strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Local Storage
//!
//! String-keyed storage read once at startup and written on every store
//! mutation. Values are JSON documents; [`load_json`] and [`save_json`] wrap
//! the raw interface for typed access.
//!
//! Backends:
//! - [`memory::InMemoryStorage`]: process-local, used by tests and ephemeral sessions
//! - [`file::FileStorage`]: one file per key under the data directory

/// File-backed storage
pub mod file;
/// Backend selection from configuration
pub mod factory;
/// In-memory storage
pub mod memory;

use crate::errors::{AppError, AppResult};
use serde::{de::DeserializeOwned, Serialize};

pub use factory::open_storage;
pub use file::FileStorage;
pub use memory::InMemoryStorage;

/// Key-value string storage for local persistence
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete `key` if present
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Whether a value exists under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn contains(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Read and decode a JSON value
///
/// # Errors
///
/// Returns an error if the backend fails or the stored document does not decode
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> AppResult<Option<T>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|e| {
        AppError::serialization(format!("Failed to decode '{key}': {e}")).with_source(e)
    })
}

/// Encode and store a JSON value
///
/// # Errors
///
/// Returns an error if encoding or the backend write fails
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}
