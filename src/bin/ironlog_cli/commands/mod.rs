// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for ironlog-cli
// ABOUTME: Provides summary, recap, health, migrate and catalog commands

pub mod catalog;
pub mod health;
pub mod migrate;
pub mod recap;
pub mod summary;
