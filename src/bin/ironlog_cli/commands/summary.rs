// ABOUTME: Summary command for ironlog-cli
// ABOUTME: Prints totals for completed workouts from the configured store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::config::AppConfig;
use ironlog::context::AppContext;
use ironlog::errors::AppResult;

use crate::helpers::display::display_summary;

/// Print the cached workout summary
pub async fn show(config: &AppConfig) -> AppResult<()> {
    let context = AppContext::open(config).await?;
    display_summary(context.workouts.summary());
    context.shutdown().await?;
    Ok(())
}
