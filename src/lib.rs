// ABOUTME: Main library entry point for the Ironlog workout tracker
// ABOUTME: Workout and health stores, exercise library, local cache, remote store and sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog
//!
//! Workout logging, planning and health goal tracking with analytics recaps.
//!
//! ## Features
//!
//! - **Workout state store**: active workout editing, completion, history and planning
//! - **Health goals**: daily and weekly goals with dated completion entries
//! - **Exercise library**: built-in catalog plus validated custom exercises
//! - **Local-first persistence**: JSON documents in a local cache, restored at startup
//! - **Remote store**: SQLite via `sqlx`, written behind a background sync worker
//! - **Migration**: one-shot upload of local-only data once a user id is configured
//!
//! ## Architecture
//!
//! - **Stores** (`store`, `health`, `library`): own in-memory state and apply
//!   mutations synchronously
//! - **Cache**: `LocalStorage` trait with file and in-memory backends
//! - **Database**: table managers plus repository traits used by the sync worker
//! - **Analytics**: pure functions in `ironlog-intelligence`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ironlog::config::AppConfig;
//! use ironlog::context::AppContext;
//! use ironlog::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let mut context = AppContext::open(&config).await?;
//!
//!     let workout_id = context.workouts.start_workout("Push Day");
//!     println!("Started {workout_id}");
//!
//!     context.shutdown().await?;
//!     Ok(())
//! }
//! ```

/// Local key-value cache with file and in-memory backends
pub mod cache;

/// Time source for "now" and the local offset
pub mod clock;

/// Environment-driven configuration
pub mod config;

/// Session wiring of configuration, stores and sync worker
pub mod context;

/// Remote relational store and repository traits
pub mod database;

/// Health goals and entries
pub mod health;

/// Built-in catalog and custom exercises
pub mod library;

/// Structured logging setup
pub mod logging;

/// Upload of local-only data to the remote store
pub mod migration;

/// Workout state store
pub mod store;

/// Background write-behind worker
pub mod sync;

/// Unified error handling re-exported from `ironlog-core`
pub mod errors;

pub use context::AppContext;
pub use health::HealthStore;
pub use library::ExerciseLibrary;
pub use store::WorkoutStore;
