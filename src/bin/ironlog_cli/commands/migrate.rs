// ABOUTME: Migration command for ironlog-cli
// ABOUTME: Uploads local-only workouts, health data and custom exercises for a user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::cache::open_storage;
use ironlog::config::AppConfig;
use ironlog::database::repositories::Repositories;
use ironlog::database::Database;
use ironlog::errors::AppResult;
use ironlog::migration::{is_migrated, migrate_to_remote, reset_migration_flag, LegacyData};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::display_migration_report;

/// Push local data to the remote store as `user_id`
pub async fn run(config: &AppConfig, user_id: Uuid, force: bool) -> AppResult<()> {
    let storage = open_storage(&config.storage, config.environment)?;

    if is_migrated(storage.as_ref())? {
        if !force {
            println!("Local data is already migrated. Use --force to upload again.");
            return Ok(());
        }
        reset_migration_flag(storage.as_ref())?;
    }

    let data = LegacyData::load(storage.as_ref())?;
    println!(
        "Found {} workouts, {} goals, {} entries, {} custom exercises",
        data.workouts.len(),
        data.goals.len(),
        data.entries.len(),
        data.custom_exercises.len()
    );

    info!("Connecting to database: {}", config.database.url);
    let database = Database::from_config(&config.database).await?;
    let repositories = Repositories::from_database(&database);

    let report = migrate_to_remote(storage.as_ref(), &repositories, user_id).await?;
    display_migration_report(&report);
    Ok(())
}
