//! Core error types for jornada-core.
//!
//! Errors are split by concern using thiserror. Read paths in the core
//! mostly recover locally and never surface these; they show up on
//! explicit user actions (import, export, reset, config changes).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jornada-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Durable store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Manual import rejected
    #[error("Import rejected: {0}")]
    Import(#[from] ImportError),

    /// A date argument is not in YYYY-MM-DD form
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Reading plan could not be loaded
    #[error("Reading plan error: {0}")]
    Plan(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`KvStore`](crate::storage::KvStore) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
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

    /// Backend cannot be used right now
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Reasons a user-supplied backup is rejected.
///
/// Import is all-or-nothing: when any of these is returned, nothing has
/// been written.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Nothing was pasted
    #[error("backup text is empty")]
    Empty,

    /// Top-level text is not JSON
    #[error("backup is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// `completedDays` is absent or not an array
    #[error("backup has no `completedDays` array")]
    MissingCompletedDays,

    /// `completedDays` contains no YYYY-MM-DD entries
    #[error("backup contains no dates in YYYY-MM-DD format")]
    NoValidDates,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
