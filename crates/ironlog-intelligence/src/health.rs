// ABOUTME: Health goal completion summaries, weekly rollups and streak statistics
// ABOUTME: Completion is measured against active daily goals only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::aggregation::completion_rate;
use crate::time::sunday_on_or_before;
use chrono::{Duration, NaiveDate};
use ironlog_core::constants::health::{DAYS_PER_WEEK, STREAK_WINDOW_DAYS};
use ironlog_core::models::{
    DailyHealthSummary, HealthEntry, HealthGoal, HealthGoalFrequency, HealthStats,
    WeeklyHealthSummary,
};
use std::collections::HashSet;

/// Completion view for `date`
#[must_use]
pub fn daily_summary(
    goals: &[HealthGoal],
    entries: &[HealthEntry],
    date: NaiveDate,
) -> DailyHealthSummary {
    let total_goals = goals.iter().filter(|g| g.counts_daily()).count();
    let day_entries: Vec<HealthEntry> = entries.iter().filter(|e| e.date == date).cloned().collect();
    let completed_goals = day_entries.iter().filter(|e| e.completed).count();
    DailyHealthSummary {
        date,
        total_goals,
        completed_goals,
        completion_rate: completion_rate(completed_goals, total_goals),
        entries: day_entries,
    }
}

fn week_days(week_start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..DAYS_PER_WEEK).map(move |offset| week_start + Duration::days(offset))
}

fn average_completion(goals: &[HealthGoal], entries: &[HealthEntry], week_start: NaiveDate) -> u32 {
    let sum: u32 = week_days(week_start)
        .map(|day| daily_summary(goals, entries, day).completion_rate)
        .sum();
    (f64::from(sum) / DAYS_PER_WEEK as f64).round() as u32
}

/// Seven-day rollup starting at `week_start`
#[must_use]
pub fn weekly_summary(
    goals: &[HealthGoal],
    entries: &[HealthEntry],
    week_start: NaiveDate,
) -> WeeklyHealthSummary {
    let week_end = week_start + Duration::days(DAYS_PER_WEEK - 1);
    let in_week = |e: &&HealthEntry| e.date >= week_start && e.date <= week_end;

    let daily_ids: HashSet<_> = goals.iter().filter(|g| g.counts_daily()).map(|g| g.id).collect();
    let weekly_goals: Vec<HealthGoal> = goals
        .iter()
        .filter(|g| g.active && g.frequency == HealthGoalFrequency::Weekly)
        .cloned()
        .collect();
    let weekly_ids: HashSet<_> = weekly_goals.iter().map(|g| g.id).collect();

    WeeklyHealthSummary {
        week_start,
        week_end,
        total_daily_goals: daily_ids.len() * DAYS_PER_WEEK as usize,
        completed_daily_goals: entries
            .iter()
            .filter(in_week)
            .filter(|e| e.completed && daily_ids.contains(&e.goal_id))
            .count(),
        weekly_entries: entries
            .iter()
            .filter(in_week)
            .filter(|e| weekly_ids.contains(&e.goal_id))
            .cloned()
            .collect(),
        weekly_goals,
        average_completion_rate: average_completion(goals, entries, week_start),
    }
}

/// Headline statistics as of `today`
///
/// Streaks only consider the trailing thirty days. A day qualifies when it
/// has at least one active daily goal and full completion; the current streak
/// counts consecutive qualifying days back from today.
#[must_use]
pub fn health_stats(goals: &[HealthGoal], entries: &[HealthEntry], today: NaiveDate) -> HealthStats {
    let qualifying: Vec<bool> = (0..STREAK_WINDOW_DAYS)
        .map(|back| {
            let summary = daily_summary(goals, entries, today - Duration::days(back));
            summary.total_goals > 0 && summary.completion_rate == 100
        })
        .collect();

    let current_streak = qualifying.iter().take_while(|q| **q).count() as u32;
    let mut longest_streak = 0_u32;
    let mut run = 0_u32;
    for day in qualifying {
        run = if day { run + 1 } else { 0 };
        longest_streak = longest_streak.max(run);
    }

    let this_week = sunday_on_or_before(today);
    let last_week = this_week - Duration::days(DAYS_PER_WEEK);

    HealthStats {
        total_goals: goals.len(),
        active_goals: goals.iter().filter(|g| g.active).count(),
        current_streak,
        longest_streak,
        this_week_completion: average_completion(goals, entries, this_week),
        last_week_completion: average_completion(goals, entries, last_week),
    }
}
