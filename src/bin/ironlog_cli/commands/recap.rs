// ABOUTME: Recap commands for ironlog-cli
// ABOUTME: Weekly comparison and single-workout recap with optional share text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::config::AppConfig;
use ironlog::context::AppContext;
use ironlog::errors::{AppError, AppResult};
use ironlog_intelligence::{weekly_recap, workout_recap};
use uuid::Uuid;

use crate::helpers::display::{display_weekly_recap, display_workout_recap};

/// Print this week against last week
pub async fn weekly(config: &AppConfig) -> AppResult<()> {
    let context = AppContext::open(config).await?;
    let recap = weekly_recap(context.workouts.workouts(), context.clock().now());
    display_weekly_recap(&recap);
    context.shutdown().await?;
    Ok(())
}

/// Print the recap of one workout
pub async fn workout(config: &AppConfig, id: Uuid, share: bool) -> AppResult<()> {
    let context = AppContext::open(config).await?;
    let Some(target) = context.workouts.get_workout(id) else {
        return Err(
            AppError::not_found(format!("Workout {id}")).with_resource_id(id.to_string())
        );
    };
    if !target.completed {
        return Err(AppError::invalid_input(format!(
            "Workout {id} has not been completed"
        )));
    }

    let recap = workout_recap(target, context.workouts.workouts());
    if share {
        println!("{}", recap.share_text());
    } else {
        display_workout_recap(&recap);
    }
    context.shutdown().await?;
    Ok(())
}
