// ABOUTME: Environment configuration management for Ironlog
// ABOUTME: Parses environment variables into typed configuration with validated values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::errors::{AppError, AppResult};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/ironlog.db";

/// Default capacity of the sync queue
pub const DEFAULT_SYNC_QUEUE: usize = 256;

/// Largest accepted UTC offset in minutes (±18h, the chrono limit)
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// Raise to debug for one `-v` flag and trace for more, keep otherwise
    #[must_use]
    pub const fn with_verbosity(self, count: u8) -> Self {
        match count {
            0 => self,
            1 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory SQLite
    Memory,
}

impl DatabaseUrl {
    /// Parse `sqlite:<path>`, `sqlite::memory:` or a bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Remote store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Create tables on startup
    pub auto_migrate: bool,
}

/// Local cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per cache key
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Platform data directory, falling back to the working directory
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir().map_or_else(|| PathBuf::from("./data"), |dir| dir.join("ironlog"))
    }
}

/// Identity used as the foreign key for remote writes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Signed-in user, `None` for local-only mode
    pub user_id: Option<Uuid>,
}

/// Write-behind sync settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Dispatch remote writes at all
    pub enabled: bool,
    /// Pending operations held before new ones are dropped
    pub queue_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            queue_capacity: DEFAULT_SYNC_QUEUE,
        }
    }
}

/// Local time settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockConfig {
    /// Fixed offset used as local time, system offset when `None`
    pub utc_offset: Option<FixedOffset>,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Remote store
    pub database: DatabaseConfig,
    /// Local cache
    pub storage: StorageConfig,
    /// Current user
    pub identity: IdentityConfig,
    /// Sync worker
    pub sync: SyncConfig,
    /// Local time
    pub clock: ClockConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable is present but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "")),
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)),
                auto_migrate: parse_bool("AUTO_MIGRATE", true)?,
            },
            storage: StorageConfig {
                data_dir: env::var("IRONLOG_DATA_DIR")
                    .map_or_else(|_| StorageConfig::default_data_dir(), PathBuf::from),
            },
            identity: IdentityConfig {
                user_id: parse_user_id()?,
            },
            sync: SyncConfig {
                enabled: parse_bool("IRONLOG_SYNC_ENABLED", true)?,
                queue_capacity: parse_queue_capacity()?,
            },
            clock: ClockConfig {
                utc_offset: parse_utc_offset()?,
            },
        };

        info!("{}", config.summary());
        Ok(config)
    }

    /// No signed-in user: everything stays in the local cache
    #[must_use]
    pub const fn is_local_only(&self) -> bool {
        self.identity.user_id.is_none()
    }

    /// One-line description for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Ironlog configuration: environment={}, database={}, data_dir={}, mode={}, sync={}",
            self.environment,
            self.database.url,
            self.storage.data_dir.display(),
            if self.is_local_only() { "local" } else { "remote" },
            if self.sync.enabled {
                "enabled"
            } else {
                "disabled"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Whether a flag variable is set to anything other than `false`/`0`
#[must_use]
pub fn env_flag(key: &str) -> bool {
    env::var(key).is_ok_and(|v| v != "false" && v != "0")
}

fn parse_bool(key: &str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(AppError::config_invalid(key, &raw)),
        },
    }
}

fn parse_user_id() -> AppResult<Option<Uuid>> {
    match env::var("IRONLOG_USER_ID") {
        Err(_) => Ok(None),
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Uuid::parse_str(raw.trim())
            .map(Some)
            .map_err(|e| AppError::config_invalid("IRONLOG_USER_ID", &raw).with_source(e)),
    }
}

fn parse_queue_capacity() -> AppResult<usize> {
    match env::var("IRONLOG_SYNC_QUEUE") {
        Err(_) => Ok(DEFAULT_SYNC_QUEUE),
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => Ok(capacity),
            _ => Err(AppError::config_invalid("IRONLOG_SYNC_QUEUE", &raw)),
        },
    }
}

fn parse_utc_offset() -> AppResult<Option<FixedOffset>> {
    let Ok(raw) = env::var("IRONLOG_UTC_OFFSET_MINUTES") else {
        return Ok(None);
    };
    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::config_invalid("IRONLOG_UTC_OFFSET_MINUTES", &raw))?;
    if minutes <= -MAX_OFFSET_MINUTES || minutes >= MAX_OFFSET_MINUTES {
        return Err(AppError::config_invalid("IRONLOG_UTC_OFFSET_MINUTES", &raw));
    }
    FixedOffset::east_opt(minutes * 60)
        .map(Some)
        .ok_or_else(|| AppError::config_invalid("IRONLOG_UTC_OFFSET_MINUTES", &raw))
}
