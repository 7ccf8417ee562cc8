//! Progress store: the canonical set of completed reading days.
//!
//! Every call re-reads the durable store; nothing is cached between calls,
//! so two views reading progress can never disagree.

use serde::Serialize;

use crate::backup;
use crate::calendar::{is_valid_iso_date, sanitize_days, sanitize_json_days};
use crate::error::Result;
use crate::storage::{keys, KvStore};

/// Result of [`ProgressStore::add_completed_day`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    /// False when the date was invalid or already recorded.
    pub added: bool,
    /// Completed days after the call.
    pub days: Vec<String>,
}

/// Result of a restore attempt from the automatic backup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    pub restored: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RestoreOutcome {
    pub fn not_restored() -> Self {
        Self::default()
    }
}

/// Completed-days access over a [`KvStore`].
pub struct ProgressStore<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> ProgressStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Completed days, sorted ascending.
    ///
    /// Missing, unreadable or corrupt data reads as an empty set.
    pub fn completed_days(&self) -> Vec<String> {
        let raw = match self.store.get(keys::COMPLETED_DAYS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read completed days");
                return Vec::new();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(items)) => sanitize_json_days(&items),
            Ok(_) => {
                tracing::warn!("completed days are not a JSON array, ignoring");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "completed days are not valid JSON, ignoring");
                Vec::new()
            }
        }
    }

    /// Sanitize and persist `days`, returning what was stored.
    pub fn set_completed_days<I, D>(&self, days: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = D>,
        D: AsRef<str>,
    {
        let sanitized = sanitize_days(days);
        self.write(&sanitized)?;
        Ok(sanitized)
    }

    /// Record `date` as completed.
    ///
    /// Invalid or already-present dates are a no-op reported through
    /// `added: false`; nothing is written in that case.
    pub fn add_completed_day(&self, date: &str) -> Result<AddOutcome> {
        let current = self.completed_days();
        if !is_valid_iso_date(date) {
            tracing::debug!(date, "ignoring malformed date");
            return Ok(AddOutcome {
                added: false,
                days: current,
            });
        }
        if current.iter().any(|d| d == date) {
            return Ok(AddOutcome {
                added: false,
                days: current,
            });
        }

        let updated = sanitize_days(current.iter().map(String::as_str).chain([date]));
        self.write(&updated)?;
        tracing::info!(date, total = updated.len(), "day marked complete");
        Ok(AddOutcome {
            added: true,
            days: updated,
        })
    }

    /// Clear completed days and the auto-restore sentinel.
    ///
    /// The automatic backup and its timestamp are left in place, and so is
    /// the gratitude journal.
    pub fn reset_progress(&self) -> Result<()> {
        self.store.remove(keys::COMPLETED_DAYS)?;
        self.store.remove(keys::AUTO_RESTORE_DONE)?;
        tracing::info!("progress reset");
        Ok(())
    }

    pub fn mark_auto_restore_done(&self) -> Result<()> {
        self.store.set(keys::AUTO_RESTORE_DONE, "1")?;
        Ok(())
    }

    pub fn is_auto_restore_done(&self) -> bool {
        matches!(self.store.get(keys::AUTO_RESTORE_DONE), Ok(Some(v)) if v == "1")
    }

    /// One-shot restore from the automatic backup on a fresh install.
    ///
    /// Runs at most once: the sentinel is set whatever the outcome, and
    /// existing progress is never overwritten. Failures are logged and
    /// reported as "not restored".
    pub fn ensure_auto_restore_once_if_needed(&self) -> RestoreOutcome {
        match self.store.get(keys::AUTO_RESTORE_DONE) {
            Ok(Some(flag)) if flag == "1" => return RestoreOutcome::not_restored(),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "could not read auto-restore flag");
                self.mark_done_best_effort();
                return RestoreOutcome::not_restored();
            }
        }

        if !self.completed_days().is_empty() {
            self.mark_done_best_effort();
            return RestoreOutcome::not_restored();
        }

        let outcome = match backup::restore_from_auto_backup(self.store) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "auto-restore failed");
                RestoreOutcome::not_restored()
            }
        };
        self.mark_done_best_effort();

        if outcome.restored {
            tracing::info!(count = outcome.count, "progress restored from automatic backup");
        }
        outcome
    }

    fn mark_done_best_effort(&self) {
        if let Err(e) = self.mark_auto_restore_done() {
            tracing::warn!(error = %e, "could not persist auto-restore flag");
        }
    }

    fn write(&self, days: &[String]) -> Result<()> {
        let json = serde_json::to_string(days)?;
        self.store.set(keys::COMPLETED_DAYS, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;
    use std::cell::Cell;

    /// Store whose writes fail once `fail_writes` is set.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: Cell<bool>,
        fail_writes: Cell<bool>,
    }

    impl KvStore for FlakyStore {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            if self.fail_reads.get() {
                return Err(StorageError::Unavailable("read".into()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable("write".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> std::result::Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn backup_json(days: &[&str]) -> String {
        serde_json::json!({
            "app": backup::AUTO_BACKUP_APP,
            "type": backup::AUTO_BACKUP_TYPE,
            "createdAt": "2026-01-20T12:00:00.000Z",
            "completedDays": days,
        })
        .to_string()
    }

    #[test]
    fn missing_key_reads_empty() {
        let store = MemoryStore::new();
        assert!(ProgressStore::new(&store).completed_days().is_empty());
    }

    #[test]
    fn corrupt_value_reads_empty() {
        let store = MemoryStore::with_entries([(keys::COMPLETED_DAYS, "{not json")]);
        assert!(ProgressStore::new(&store).completed_days().is_empty());

        let store = MemoryStore::with_entries([(keys::COMPLETED_DAYS, "{\"a\": 1}")]);
        assert!(ProgressStore::new(&store).completed_days().is_empty());
    }

    #[test]
    fn read_failure_reads_empty() {
        let store = FlakyStore::default();
        store.fail_reads.set(true);
        assert!(ProgressStore::new(&store).completed_days().is_empty());
    }

    #[test]
    fn foreign_entries_are_filtered_on_read() {
        let store = MemoryStore::with_entries([(
            keys::COMPLETED_DAYS,
            r#"["2026-01-07", 5, "x", "2026-01-05", "2026-01-07"]"#,
        )]);
        assert_eq!(
            ProgressStore::new(&store).completed_days(),
            vec!["2026-01-05", "2026-01-07"]
        );
    }

    #[test]
    fn set_then_get_returns_projection() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);
        let stored = progress
            .set_completed_days(["2026-01-09", "nope", "2026-01-05", "2026-01-09"])
            .unwrap();
        assert_eq!(stored, vec!["2026-01-05", "2026-01-09"]);
        assert_eq!(progress.completed_days(), stored);
        assert_eq!(
            store.get(keys::COMPLETED_DAYS).unwrap().as_deref(),
            Some(r#"["2026-01-05","2026-01-09"]"#)
        );
    }

    #[test]
    fn add_is_idempotent() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);

        let first = progress.add_completed_day("2026-01-06").unwrap();
        assert!(first.added);
        assert_eq!(first.days, vec!["2026-01-06"]);

        let raw_before = store.get(keys::COMPLETED_DAYS).unwrap();
        let second = progress.add_completed_day("2026-01-06").unwrap();
        assert!(!second.added);
        assert_eq!(second.days, vec!["2026-01-06"]);
        assert_eq!(store.get(keys::COMPLETED_DAYS).unwrap(), raw_before);
    }

    #[test]
    fn add_keeps_order() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);
        progress.add_completed_day("2026-01-08").unwrap();
        let out = progress.add_completed_day("2026-01-05").unwrap();
        assert_eq!(out.days, vec!["2026-01-05", "2026-01-08"]);
    }

    #[test]
    fn add_rejects_malformed_date_without_writing() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);
        let out = progress.add_completed_day("06/01/2026").unwrap();
        assert!(!out.added);
        assert!(out.days.is_empty());
        assert!(store.get(keys::COMPLETED_DAYS).unwrap().is_none());
    }

    #[test]
    fn add_surfaces_write_failure() {
        let store = FlakyStore::default();
        store.fail_writes.set(true);
        assert!(ProgressStore::new(&store).add_completed_day("2026-01-06").is_err());
    }

    #[test]
    fn reset_clears_days_and_flag_only() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);
        progress.add_completed_day("2026-01-06").unwrap();
        progress.mark_auto_restore_done().unwrap();
        store.set(keys::AUTO_BACKUP, &backup_json(&["2026-01-06"])).unwrap();
        store.set(keys::LAST_AUTO_BACKUP, "2026-01-06T12:00:00.000Z").unwrap();
        store.set(keys::GRATITUDE_BY_DATE, "{}").unwrap();

        progress.reset_progress().unwrap();

        assert!(progress.completed_days().is_empty());
        assert!(!progress.is_auto_restore_done());
        assert!(store.get(keys::AUTO_BACKUP).unwrap().is_some());
        assert!(store.get(keys::LAST_AUTO_BACKUP).unwrap().is_some());
        assert!(store.get(keys::GRATITUDE_BY_DATE).unwrap().is_some());
    }

    #[test]
    fn mark_auto_restore_done_is_idempotent() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);
        progress.mark_auto_restore_done().unwrap();
        progress.mark_auto_restore_done().unwrap();
        assert_eq!(store.get(keys::AUTO_RESTORE_DONE).unwrap().as_deref(), Some("1"));
        assert!(progress.is_auto_restore_done());
    }

    #[test]
    fn fresh_install_restores_once() {
        let days: Vec<String> = (5..15).map(|d| format!("2026-01-{d:02}")).collect();
        let refs: Vec<&str> = days.iter().map(String::as_str).collect();
        let store = MemoryStore::with_entries([(keys::AUTO_BACKUP, backup_json(&refs))]);
        let progress = ProgressStore::new(&store);

        let first = progress.ensure_auto_restore_once_if_needed();
        assert!(first.restored);
        assert_eq!(first.count, 10);
        assert_eq!(first.created_at.as_deref(), Some("2026-01-20T12:00:00.000Z"));
        assert!(progress.is_auto_restore_done());
        assert_eq!(progress.completed_days(), days);

        let second = progress.ensure_auto_restore_once_if_needed();
        assert_eq!(second, RestoreOutcome::not_restored());
    }

    #[test]
    fn existing_progress_is_never_overwritten() {
        let store = MemoryStore::with_entries([(
            keys::AUTO_BACKUP,
            backup_json(&["2026-01-05", "2026-01-06"]),
        )]);
        let progress = ProgressStore::new(&store);
        progress.add_completed_day("2026-02-02").unwrap();

        let out = progress.ensure_auto_restore_once_if_needed();
        assert!(!out.restored);
        assert!(progress.is_auto_restore_done());
        assert_eq!(progress.completed_days(), vec!["2026-02-02"]);
    }

    #[test]
    fn missing_backup_still_sets_flag() {
        let store = MemoryStore::new();
        let progress = ProgressStore::new(&store);
        let out = progress.ensure_auto_restore_once_if_needed();
        assert_eq!(out, RestoreOutcome::not_restored());
        assert!(progress.is_auto_restore_done());
    }

    #[test]
    fn restore_failure_is_swallowed() {
        let store = FlakyStore::default();
        store
            .inner
            .set(keys::AUTO_BACKUP, &backup_json(&["2026-01-05"]))
            .unwrap();
        store.fail_writes.set(true);

        let progress = ProgressStore::new(&store);
        let out = progress.ensure_auto_restore_once_if_needed();
        assert_eq!(out, RestoreOutcome::not_restored());
        // flag write failed as well; nothing persisted
        assert!(store.inner.get(keys::AUTO_RESTORE_DONE).unwrap().is_none());
    }

    #[test]
    fn reset_reenables_auto_restore() {
        let store = MemoryStore::with_entries([(keys::AUTO_BACKUP, backup_json(&["2026-01-05"]))]);
        let progress = ProgressStore::new(&store);
        progress.add_completed_day("2026-01-06").unwrap();
        assert!(!progress.ensure_auto_restore_once_if_needed().restored);

        progress.reset_progress().unwrap();
        let again = progress.ensure_auto_restore_once_if_needed();
        assert!(again.restored);
        assert_eq!(progress.completed_days(), vec!["2026-01-05"]);
    }
}
