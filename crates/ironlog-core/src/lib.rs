// ABOUTME: Core types and constants for the Ironlog workout tracker
// ABOUTME: Foundation crate with error handling, domain models, exercise catalog, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog Core
//!
//! Foundation crate providing shared types and constants for Ironlog. This crate
//! is designed to change infrequently, enabling incremental compilation benefits
//! in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Storage keys, analytics thresholds and other fixed values
//! - **models**: Exercises, workouts, sets, planned workouts and health goals
//! - **catalog**: The built-in exercise catalog

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Exercise, Workout, `HealthGoal`, etc.)
pub mod models;

/// Built-in exercise catalog seeded at startup
pub mod catalog;
