mod config;
pub mod database;
mod memory;

pub use config::{BackupConfig, Config, ReadingConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};

/// Keys under which the core persists its state.
///
/// Each key has exactly one owning module; values are UTF-8 strings,
/// JSON-encoded unless noted.
pub mod keys {
    /// JSON array of ISO dates. Owned by the progress store.
    pub const COMPLETED_DAYS: &str = "completedDays";
    /// Literal `"1"` once the first-launch restore check has run.
    pub const AUTO_RESTORE_DONE: &str = "autoRestoreDone";
    /// JSON auto-backup record.
    pub const AUTO_BACKUP: &str = "autoBackupData";
    /// RFC 3339 timestamp of the last auto-backup.
    pub const LAST_AUTO_BACKUP: &str = "lastAutoBackupDate";
    /// JSON object mapping ISO date to a short note.
    pub const GRATITUDE_BY_DATE: &str = "gratitudeByDate";
    /// Plain string.
    pub const USER_NAME: &str = "userName";
    /// `"1"` or `"0"`.
    pub const HAS_ONBOARDED: &str = "hasOnboarded";
}

/// Durable string store the core persists through.
///
/// Backends only need to honor single-key atomic replace; the core never
/// relies on multi-key transactions.
pub trait KvStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `JORNADA_DATA_DIR` wins when set. Otherwise `~/.config/jornada[-dev]/`
/// is used, selected by `JORNADA_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("JORNADA_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("JORNADA_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("jornada-dev")
            } else {
                base_dir.join("jornada")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
