// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for estatekeep.

use thiserror::Error;

/// The primary error type used across the store trait and the services.
#[derive(Debug, Error)]
pub enum EstateError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema migration failed while opening the database.
    #[error("migration error: {0}")]
    Migration(String),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Caller supplied missing or malformed input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The priority helper was asked to pick from an empty rule list.
    #[error("no rules provided")]
    NoRulesProvided,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EstateError {
    /// Shorthand for a [`EstateError::NotFound`] with an owned id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
