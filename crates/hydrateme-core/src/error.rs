//! Core error types for hydrateme-core.
//!
//! Every failure in the engine degrades to a rejected no-op or a safe
//! default; nothing here is fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hydrateme-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected intake events
    #[error("Intake rejected: {0}")]
    Intake(#[from] IntakeError),

    /// Stored state could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The tracker has no profile yet
    #[error("No profile found; run onboarding first")]
    NotOnboarded,
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Intake events that were rejected before touching any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// Amount was non-positive or not a number
    #[error("Invalid amount '{0}': must be a positive whole number of millilitres")]
    InvalidAmount(String),

    /// Glass index outside the rendered row
    #[error("Glass index {index} out of range (0..{count})")]
    InvalidGlass { index: usize, count: usize },
}

/// Persistence gateway errors.
///
/// Reads never surface these to callers of [`crate::storage::StateStore::load_state`];
/// they are logged and the store reports "no prior state" instead.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Slot could not be read
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Slot held something that does not parse
    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Slot could not be written
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Onboarding field failed to parse; the default was used instead
    #[error("Invalid value '{value}' for '{field}', using default {fallback}")]
    InvalidProfileInput {
        field: String,
        value: String,
        fallback: String,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_amount_message_names_input() {
        let err = IntakeError::InvalidAmount("-5".into());
        assert!(err.to_string().contains("'-5'"));
    }

    #[test]
    fn intake_error_converts_into_core_error() {
        let err: CoreError = IntakeError::InvalidGlass { index: 9, count: 8 }.into();
        assert!(matches!(err, CoreError::Intake(IntakeError::InvalidGlass { index: 9, .. })));
    }

    #[test]
    fn rusqlite_errors_map_to_query_failed() {
        let err: DatabaseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }
}
