// ABOUTME: Catalog commands for ironlog-cli
// ABOUTME: Lists built-in and custom exercises, optionally filtered by muscle group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::config::AppConfig;
use ironlog::context::AppContext;
use ironlog::errors::AppResult;

use crate::helpers::display::display_exercises;

/// List exercises in the library
pub async fn list(config: &AppConfig, muscle: Option<&str>) -> AppResult<()> {
    let context = AppContext::open(config).await?;
    let exercises = match muscle {
        Some(group) => context.library.by_muscle_group(group),
        None => context.library.all(),
    };
    if exercises.is_empty() {
        println!("No exercises found");
    } else {
        display_exercises(&exercises);
    }
    if muscle.is_none() {
        println!("\nMuscle groups: {}", context.library.muscle_groups().join(", "));
    }
    context.shutdown().await?;
    Ok(())
}
