//! Cadence-limited automatic backup and its restore path.
//!
//! The writer is invoked on every launch and foreground-resume; it only
//! writes when the previous snapshot is older than the configured
//! interval. Restore validates the record's tags before touching progress.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{format_timestamp, parse_timestamp, sanitize_json_days};
use crate::error::Result;
use crate::progress::{ProgressStore, RestoreOutcome};
use crate::storage::{keys, Config, KvStore};

/// `app` tag every automatic snapshot carries.
pub const AUTO_BACKUP_APP: &str = "Jornada Bíblica";
/// `type` tag every automatic snapshot carries.
pub const AUTO_BACKUP_TYPE: &str = "auto-backup";

const DEFAULT_INTERVAL_DAYS: i64 = 7;

/// Persisted automatic snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBackupRecord {
    pub app: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: String,
    pub completed_days: Vec<String>,
}

impl AutoBackupRecord {
    pub fn new(created_at: DateTime<Utc>, completed_days: Vec<String>) -> Self {
        Self {
            app: AUTO_BACKUP_APP.to_string(),
            kind: AUTO_BACKUP_TYPE.to_string(),
            created_at: format_timestamp(created_at),
            completed_days,
        }
    }
}

/// What a call to [`AutoBackup::run_auto_backup`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AutoBackupOutcome {
    /// The previous snapshot is recent enough.
    Skipped { last_backup_at: String },
    /// A new snapshot was written.
    Written { created_at: String, count: usize },
    /// Storage failed; nothing is guaranteed to have been written.
    Failed { reason: String },
}

/// Automatic backup writer.
#[derive(Debug, Clone, Copy)]
pub struct AutoBackup {
    interval: Duration,
}

impl Default for AutoBackup {
    fn default() -> Self {
        Self {
            interval: Duration::days(DEFAULT_INTERVAL_DAYS),
        }
    }
}

impl AutoBackup {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.auto_backup_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Snapshot progress unless the last snapshot is younger than the
    /// interval.
    ///
    /// Safe to call as often as the host likes. Never returns an error:
    /// failures are logged and reported as [`AutoBackupOutcome::Failed`].
    pub fn run_auto_backup<S: KvStore + ?Sized>(
        &self,
        store: &S,
        now: DateTime<Utc>,
    ) -> AutoBackupOutcome {
        match self.try_run(store, now) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "automatic backup failed");
                AutoBackupOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_run<S: KvStore + ?Sized>(&self, store: &S, now: DateTime<Utc>) -> Result<AutoBackupOutcome> {
        if let Some(last) = store.get(keys::LAST_AUTO_BACKUP)? {
            // An unreadable timestamp does not block a new snapshot.
            if let Some(last_at) = parse_timestamp(&last) {
                if now.signed_duration_since(last_at) < self.interval {
                    tracing::debug!(last_backup_at = %last, "automatic backup not due");
                    return Ok(AutoBackupOutcome::Skipped {
                        last_backup_at: last,
                    });
                }
            }
        }

        let completed_days = ProgressStore::new(store).completed_days();
        let count = completed_days.len();
        let record = AutoBackupRecord::new(now, completed_days);

        store.set(keys::AUTO_BACKUP, &serde_json::to_string(&record)?)?;
        store.set(keys::LAST_AUTO_BACKUP, &record.created_at)?;

        tracing::info!(count, created_at = %record.created_at, "automatic backup saved");
        Ok(AutoBackupOutcome::Written {
            created_at: record.created_at,
            count,
        })
    }
}

/// Replace progress with the automatic snapshot, if it is valid.
///
/// A missing, unparsable or foreign record, or one without any valid
/// date, yields "not restored". Only storage failures are errors.
pub fn restore_from_auto_backup<S: KvStore + ?Sized>(store: &S) -> Result<RestoreOutcome> {
    let Some(raw) = store.get(keys::AUTO_BACKUP)? else {
        return Ok(RestoreOutcome::not_restored());
    };

    let parsed: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "automatic backup is not valid JSON");
            return Ok(RestoreOutcome::not_restored());
        }
    };

    let tag = |field: &str| parsed.get(field).and_then(serde_json::Value::as_str);
    if tag("app") != Some(AUTO_BACKUP_APP) || tag("type") != Some(AUTO_BACKUP_TYPE) {
        tracing::debug!("automatic backup tags do not match, ignoring");
        return Ok(RestoreOutcome::not_restored());
    }

    let valid = parsed
        .get("completedDays")
        .and_then(serde_json::Value::as_array)
        .map(|items| sanitize_json_days(items))
        .unwrap_or_default();
    if valid.is_empty() {
        return Ok(RestoreOutcome::not_restored());
    }

    let stored = ProgressStore::new(store).set_completed_days(valid)?;
    Ok(RestoreOutcome {
        restored: true,
        count: stored.len(),
        created_at: tag("createdAt").map(str::to_string),
    })
}

/// User-requested restore from the automatic snapshot.
///
/// On success the auto-restore sentinel is set so the launch-time check
/// cannot apply the snapshot a second time.
pub fn restore_auto_backup_now<S: KvStore + ?Sized>(store: &S) -> Result<RestoreOutcome> {
    let outcome = restore_from_auto_backup(store)?;
    if outcome.restored {
        ProgressStore::new(store).mark_auto_restore_done()?;
    }
    Ok(outcome)
}

pub fn has_auto_backup<S: KvStore + ?Sized>(store: &S) -> bool {
    matches!(store.get(keys::AUTO_BACKUP), Ok(Some(raw)) if !raw.is_empty())
}

/// Timestamp of the last automatic snapshot, as stored.
pub fn last_backup_at<S: KvStore + ?Sized>(store: &S) -> Option<String> {
    store
        .get(keys::LAST_AUTO_BACKUP)
        .ok()
        .flatten()
        .filter(|s| !s.is_empty())
}
