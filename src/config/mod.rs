// ABOUTME: Configuration management module for Ironlog runtime settings
// ABOUTME: Environment-driven configuration for storage, database, identity, sync and clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables with sensible defaults:
//!
//! - **Database**: remote relational store URL (`DATABASE_URL`)
//! - **Storage**: local cache directory (`IRONLOG_DATA_DIR`)
//! - **Identity**: user id for remote writes (`IRONLOG_USER_ID`), absent means local-only
//! - **Sync**: write-behind worker settings (`IRONLOG_SYNC_ENABLED`, `IRONLOG_SYNC_QUEUE`)
//! - **Clock**: pinned local UTC offset (`IRONLOG_UTC_OFFSET_MINUTES`)

/// Environment and application configuration
pub mod environment;

pub use environment::{
    AppConfig, ClockConfig, DatabaseConfig, DatabaseUrl, Environment, IdentityConfig, LogLevel,
    StorageConfig, SyncConfig,
};
