// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for ironlog-cli
// ABOUTME: Provides consistent display functions for summaries, recaps and reports

use chrono::NaiveDate;
use ironlog::migration::MigrationReport;
use ironlog_core::constants::analytics::WEIGHT_UNIT;
use ironlog_core::models::{Exercise, HealthStats, WorkoutSummary};
use ironlog_intelligence::{WeeklyRecap, WorkoutRecap};

/// Display workout totals
pub fn display_summary(summary: &WorkoutSummary) {
    println!("\nWorkout Summary");
    println!("{}", "=".repeat(50));
    println!("   Total workouts: {}", summary.total_workouts);
    println!("   This week: {}", summary.this_week_workouts);
    println!("   Total time: {} min", summary.total_duration / 60);
    println!(
        "   Favorite exercise: {}",
        summary.favorite_exercise.as_deref().unwrap_or("-")
    );
}

/// Display the weekly comparison
pub fn display_weekly_recap(recap: &WeeklyRecap) {
    println!(
        "\nWeekly Recap ({} to now)",
        recap.this_week_start.format("%b %d")
    );
    println!("{}", "=".repeat(50));
    if recap.is_empty() {
        println!("   No workouts in the last two weeks");
        return;
    }
    println!(
        "   Workouts: {} (last week {})",
        recap.this_week_workouts, recap.last_week_workouts
    );
    println!(
        "   Volume: {} {WEIGHT_UNIT} (last week {} {WEIGHT_UNIT}, {:+}%)",
        recap.this_week_volume, recap.last_week_volume, recap.volume_change_percent
    );
    println!(
        "   Progress: {} of {} exercises improved",
        recap.progress_count, recap.total_exercises
    );
    for exercise in &recap.improved_exercises {
        println!(
            "     • {}: {} -> {} {WEIGHT_UNIT}",
            exercise.name, exercise.previous_max_weight, exercise.current_max_weight
        );
    }
    if !recap.muscle_groups.is_empty() {
        println!("   Muscle groups:");
        for group in recap.top_muscle_groups() {
            println!(
                "     • {}: {} sets ({:+})",
                group.name, group.current_sets, group.change
            );
        }
    }
}

/// Display the full single-workout breakdown
pub fn display_workout_recap(recap: &WorkoutRecap) {
    println!(
        "\n{} ({})",
        recap.workout_name,
        recap.date.format("%Y-%m-%d")
    );
    println!("{}", "=".repeat(50));
    println!(
        "   Volume: {} {WEIGHT_UNIT} ({:+.0}%)",
        recap.totals.volume, recap.volume_change_percent
    );
    println!("   Sets: {} ({:+})", recap.totals.sets, recap.sets_change);
    for exercise in &recap.exercises {
        println!(
            "     • {}: {} {WEIGHT_UNIT} x {} ({:?})",
            exercise.name, exercise.current_max_weight, exercise.current_max_reps, exercise.status
        );
    }
    if !recap.personal_records.is_empty() {
        println!("   Personal records:");
        for record in &recap.personal_records {
            println!("     • {}: {}", record.exercise_name, record.improvement);
        }
    }
    println!(
        "   Progress streak: {} (best {})",
        recap.streak.current, recap.streak.best
    );
    if !recap.next_goals.is_empty() {
        println!("   Next session:");
        for goal in &recap.next_goals {
            println!("     • {goal}");
        }
    }
}

/// Display health goal stats
pub fn display_health_stats(today: NaiveDate, stats: &HealthStats) {
    println!("\nHealth Stats ({today})");
    println!("{}", "=".repeat(50));
    println!(
        "   Goals: {} active of {}",
        stats.active_goals, stats.total_goals
    );
    println!(
        "   Streak: {} days (longest {})",
        stats.current_streak, stats.longest_streak
    );
    println!(
        "   Completion: {}% this week, {}% last week",
        stats.this_week_completion, stats.last_week_completion
    );
}

/// Display an exercise table
pub fn display_exercises(exercises: &[&Exercise]) {
    println!("{:<6} {:<28} {:<12} Muscle groups", "ID", "Name", "Type");
    println!("{}", "-".repeat(80));
    for exercise in exercises {
        let id = if exercise.custom {
            "custom"
        } else {
            exercise.id.as_str()
        };
        println!(
            "{id:<6} {:<28} {:<12} {}",
            exercise.name,
            exercise.exercise_type,
            exercise.muscle_groups.join(", ")
        );
    }
}

/// Display the outcome of a migration run
pub fn display_migration_report(report: &MigrationReport) {
    println!("\nMigration Report");
    println!("{}", "=".repeat(50));
    println!("   Workouts: {}", report.workouts);
    println!("   Health goals: {}", report.goals);
    println!("   Health entries: {}", report.entries);
    println!("   Custom exercises: {}", report.custom_exercises);
    if !report.is_clean() {
        println!("   Failures:");
        for failure in &report.failures {
            println!("     • {failure}");
        }
    }
    println!("\n{}", report.user_message());
}
