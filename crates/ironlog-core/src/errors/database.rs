// ABOUTME: Structured error types for repository and database operations
// ABOUTME: Provides domain-specific errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors returned by the repository layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or acquire a connection
    #[error("database connection failed: {context}")]
    ConnectionError {
        /// What was being attempted
        context: String,
    },

    /// A query failed
    #[error("database query failed: {context}")]
    QueryError {
        /// What was being attempted
        context: String,
    },

    /// Schema creation failed
    #[error("database migration failed: {context}")]
    MigrationError {
        /// What was being attempted
        context: String,
    },

    /// Entity missing
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity (workout, goal, ...)
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// Stored data could not be decoded
    #[error("failed to decode stored {entity_type}: {reason}")]
    SerializationError {
        /// Kind of entity being decoded
        entity_type: &'static str,
        /// Decoder message
        reason: String,
    },
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    context: error.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::SerializationError {
                    entity_type: "row",
                    reason: error.to_string(),
                }
            }
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
