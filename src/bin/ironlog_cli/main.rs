// ABOUTME: Ironlog CLI - command-line access to workout history, recaps and health stats
// ABOUTME: Reads the local cache or remote store and can migrate local data for a user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Workout totals and favorite exercise
//! ironlog-cli summary
//!
//! # This week compared with last week
//! ironlog-cli recap weekly
//!
//! # Recap of one completed workout
//! ironlog-cli recap workout 6f1c2a9e-...
//!
//! # Health goal streaks
//! ironlog-cli health stats
//!
//! # Push local-only data to the remote store
//! ironlog-cli migrate --user-id 6f1c2a9e-...
//!
//! # Built-in and custom exercises targeting a muscle group
//! ironlog-cli catalog list --muscle chest
//! ```

mod commands;
mod helpers;

use clap::{ArgAction, Parser, Subcommand};
use ironlog::config::{AppConfig, DatabaseUrl};
use ironlog::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "ironlog-cli",
    about = "Ironlog workout tracker CLI",
    long_about = "Command-line tool for inspecting Ironlog workout history, recaps and health goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Local cache directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Raise log verbosity over `LOG_LEVEL` (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show workout totals
    Summary,

    /// Recap commands
    Recap {
        #[command(subcommand)]
        action: RecapCommand,
    },

    /// Health goal commands
    Health {
        #[command(subcommand)]
        action: HealthCommand,
    },

    /// Upload local-only data to the remote store
    Migrate {
        /// User that will own the uploaded data
        #[arg(long)]
        user_id: Uuid,

        /// Migrate again even if the cache is already marked migrated
        #[arg(long)]
        force: bool,
    },

    /// Exercise catalog commands
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum RecapCommand {
    /// Compare the trailing seven days with the seven before
    Weekly,

    /// Recap one completed workout
    Workout {
        /// Workout ID
        id: Uuid,

        /// Print the shareable text instead of the full breakdown
        #[arg(long)]
        share: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum HealthCommand {
    /// Streaks and weekly completion
    Stats,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CatalogCommand {
    /// List exercises
    List {
        /// Only exercises tagged with this muscle group
        #[arg(long)]
        muscle: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    let log_level = config.log_level.with_verbosity(cli.verbose);
    LoggingConfig::from_env()
        .with_level(log_level.to_string())
        .init()?;

    info!(level = %log_level, "Ironlog CLI");

    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(url) = cli.database_url {
        config.database.url = DatabaseUrl::parse_url(&url);
    }

    match cli.command {
        Command::Summary => commands::summary::show(&config).await?,
        Command::Recap { action } => match action {
            RecapCommand::Weekly => commands::recap::weekly(&config).await?,
            RecapCommand::Workout { id, share } => {
                commands::recap::workout(&config, id, share).await?;
            }
        },
        Command::Health { action } => match action {
            HealthCommand::Stats => commands::health::stats(&config).await?,
        },
        Command::Migrate { user_id, force } => {
            commands::migrate::run(&config, user_id, force).await?;
        }
        Command::Catalog { action } => match action {
            CatalogCommand::List { muscle } => {
                commands::catalog::list(&config, muscle.as_deref()).await?;
            }
        },
    }

    Ok(())
}
