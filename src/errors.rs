// ABOUTME: Unified error handling re-exported from ironlog-core
// ABOUTME: Single AppError type shared by the stores, persistence layer and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use ironlog_core::errors::{AppError, AppResult, DatabaseError, ErrorCode, ErrorContext};
