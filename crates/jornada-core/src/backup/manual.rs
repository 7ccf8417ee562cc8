//! User-facing JSON export and import.
//!
//! Export produces a pretty-printed document the user can copy anywhere.
//! Import accepts the same document (and older ones that carry only
//! `completedDays`), validates all of it, and only then writes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auto::AUTO_BACKUP_APP;
use crate::calendar::{format_timestamp, sanitize_json_days};
use crate::error::{ImportError, Result};
use crate::gratitude::{sanitize_gratitude_map, GratitudeJournal};
use crate::profile::ProfileStore;
use crate::progress::ProgressStore;
use crate::storage::KvStore;

/// Exported backup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualBackupPayload {
    pub app: String,
    pub version: String,
    pub exported_at: String,
    pub completed_days: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gratitude_by_date: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_onboarded: Option<bool>,
}

impl ManualBackupPayload {
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Also export `userName` and `hasOnboarded`.
    pub include_profile: bool,
}

/// What an accepted import changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Completed days now stored.
    pub days: usize,
    /// Journal entries now stored.
    pub gratitude_entries: usize,
    pub user_name_applied: bool,
    pub has_onboarded_applied: bool,
}

/// Snapshot progress, the journal and optionally the profile.
pub fn export_backup<S: KvStore + ?Sized>(
    store: &S,
    now: DateTime<Utc>,
    options: ExportOptions,
) -> Result<ManualBackupPayload> {
    let completed_days = ProgressStore::new(store).completed_days();
    let gratitude = GratitudeJournal::new(store).entries();

    let (user_name, has_onboarded) = if options.include_profile {
        let profile = ProfileStore::new(store).load()?;
        (profile.user_name, Some(profile.has_onboarded))
    } else {
        (None, None)
    };

    tracing::info!(days = completed_days.len(), notes = gratitude.len(), "backup exported");
    Ok(ManualBackupPayload {
        app: AUTO_BACKUP_APP.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: format_timestamp(now),
        completed_days,
        gratitude_by_date: Some(gratitude),
        user_name,
        has_onboarded,
    })
}

/// Validated contents of a backup, ready to write.
struct ParsedBackup {
    days: Vec<String>,
    gratitude: BTreeMap<String, String>,
    user_name: Option<String>,
    has_onboarded: Option<bool>,
}

fn parse_backup(text: &str) -> std::result::Result<ParsedBackup, ImportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ImportError::Empty);
    }

    let parsed: serde_json::Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;

    let days = parsed
        .get("completedDays")
        .and_then(serde_json::Value::as_array)
        .map(|items| sanitize_json_days(items))
        .ok_or(ImportError::MissingCompletedDays)?;
    if days.is_empty() {
        return Err(ImportError::NoValidDates);
    }

    // An absent or malformed journal clears the stored one.
    let gratitude = sanitize_gratitude_map(
        parsed
            .get("gratitudeByDate")
            .unwrap_or(&serde_json::Value::Null),
    );
    let user_name = parsed
        .get("userName")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let has_onboarded = parsed.get("hasOnboarded").and_then(serde_json::Value::as_bool);

    Ok(ParsedBackup {
        days,
        gratitude,
        user_name,
        has_onboarded,
    })
}

/// Replace local state with a pasted backup.
///
/// Nothing is written unless the whole document validates. On success
/// the auto-restore sentinel is set so the launch-time restore cannot
/// overwrite what was just imported.
pub fn import_backup<S: KvStore + ?Sized>(store: &S, text: &str) -> Result<ImportSummary> {
    let backup = parse_backup(text)?;

    let progress = ProgressStore::new(store);
    let days = progress.set_completed_days(&backup.days)?.len();

    GratitudeJournal::new(store).replace_all(&backup.gratitude)?;
    let gratitude_entries = backup.gratitude.len();

    let profiles = ProfileStore::new(store);
    let user_name_applied = match &backup.user_name {
        Some(name) => profiles.set_user_name(name)?,
        None => false,
    };
    if let Some(done) = backup.has_onboarded {
        profiles.set_has_onboarded(done)?;
    }

    progress.mark_auto_restore_done()?;

    tracing::info!(days, gratitude_entries, "backup imported");
    Ok(ImportSummary {
        days,
        gratitude_entries,
        user_name_applied,
        has_onboarded_applied: backup.has_onboarded.is_some(),
    })
}
