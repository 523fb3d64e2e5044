// ABOUTME: Health commands for ironlog-cli
// ABOUTME: Prints goal counts, streaks and weekly completion as of today
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::config::AppConfig;
use ironlog::context::AppContext;
use ironlog::errors::AppResult;

use crate::helpers::display::display_health_stats;

/// Print health stats for the clock's current day
pub async fn stats(config: &AppConfig) -> AppResult<()> {
    let context = AppContext::open(config).await?;
    let today = context.clock().today();
    display_health_stats(today, &context.health.stats(today));
    context.shutdown().await?;
    Ok(())
}
