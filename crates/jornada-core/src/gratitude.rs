//! Gratitude journal: one short note per calendar day.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::calendar::is_valid_iso_date;
use crate::error::{CoreError, Result};
use crate::plan::percent_of;
use crate::storage::{keys, KvStore};

/// Notes longer than this are cut, counted in characters.
pub const MAX_NOTE_CHARS: usize = 200;

/// Trim and cap a note. Blank notes yield `None`.
pub fn sanitize_note(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_NOTE_CHARS).collect())
}

/// Keep entries whose key is an ISO date and whose value is a non-blank
/// string; everything else is dropped silently.
pub fn sanitize_gratitude_map(input: &serde_json::Value) -> BTreeMap<String, String> {
    let Some(obj) = input.as_object() else {
        return BTreeMap::new();
    };

    obj.iter()
        .filter(|(date, _)| is_valid_iso_date(date))
        .filter_map(|(date, note)| Some((date.clone(), sanitize_note(note.as_str()?)?)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GratitudeCoverage {
    /// Number of notes in the journal.
    pub total: usize,
    /// Completed days that also have a note.
    pub completed_with_note: usize,
    /// `completed_with_note` over completed days, 0–100.
    pub percent: u32,
}

/// Journal access over a [`KvStore`].
pub struct GratitudeJournal<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> GratitudeJournal<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All notes keyed by date. Unreadable data reads as empty.
    pub fn entries(&self) -> BTreeMap<String, String> {
        let raw = match self.store.get(keys::GRATITUDE_BY_DATE) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read gratitude journal");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => sanitize_gratitude_map(&value),
            Err(e) => {
                tracing::warn!(error = %e, "gratitude journal is not valid JSON, ignoring");
                BTreeMap::new()
            }
        }
    }

    pub fn entry_for(&self, date: &str) -> Option<String> {
        self.entries().remove(date)
    }

    /// Store the note for `date`. A blank note removes the entry.
    ///
    /// Returns the note as stored.
    pub fn set_entry(&self, date: &str, text: &str) -> Result<Option<String>> {
        if !is_valid_iso_date(date) {
            return Err(CoreError::InvalidDate(date.to_string()));
        }

        let mut entries = self.entries();
        let note = sanitize_note(text);
        match &note {
            Some(note) => {
                entries.insert(date.to_string(), note.clone());
            }
            None => {
                entries.remove(date);
            }
        }
        self.write(&entries)?;
        Ok(note)
    }

    /// Replace the whole journal.
    pub fn replace_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        self.write(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::GRATITUDE_BY_DATE)?;
        Ok(())
    }

    pub fn coverage<D: AsRef<str>>(&self, completed_days: &[D]) -> GratitudeCoverage {
        let entries = self.entries();
        let completed_with_note = completed_days
            .iter()
            .filter(|d| entries.contains_key(d.as_ref()))
            .count();

        GratitudeCoverage {
            total: entries.len(),
            completed_with_note,
            percent: percent_of(completed_with_note, completed_days.len()),
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(keys::GRATITUDE_BY_DATE, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    #[test]
    fn sanitize_drops_bad_keys_and_values() {
        let input = json!({
            "2026-01-05": "  Thankful for rest  ",
            "2026-01-06": "",
            "2026-01-07": "   ",
            "2026-01-08": 42,
            "tomorrow": "nope",
            "2026-01-09": null,
        });
        let clean = sanitize_gratitude_map(&input);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean["2026-01-05"], "Thankful for rest");
    }

    #[test]
    fn sanitize_non_object_is_empty() {
        assert!(sanitize_gratitude_map(&json!(["2026-01-05"])).is_empty());
        assert!(sanitize_gratitude_map(&json!(null)).is_empty());
        assert!(sanitize_gratitude_map(&json!("text")).is_empty());
    }

    #[test]
    fn notes_are_capped_by_characters() {
        let long = "ã".repeat(250);
        let note = sanitize_note(&long).unwrap();
        assert_eq!(note.chars().count(), MAX_NOTE_CHARS);
        assert_eq!(sanitize_note(&"a".repeat(200)).unwrap().len(), 200);
    }

    #[test]
    fn set_and_read_entries() {
        let store = MemoryStore::new();
        let journal = GratitudeJournal::new(&store);
        assert_eq!(
            journal.set_entry("2026-01-05", " family ").unwrap().as_deref(),
            Some("family")
        );
        journal.set_entry("2026-01-06", "health").unwrap();
        assert_eq!(journal.entry_for("2026-01-05").as_deref(), Some("family"));
        assert_eq!(journal.entries().len(), 2);

        journal.set_entry("2026-01-05", "  ").unwrap();
        assert!(journal.entry_for("2026-01-05").is_none());
        assert_eq!(journal.entries().len(), 1);
    }

    #[test]
    fn set_entry_rejects_bad_date() {
        let store = MemoryStore::new();
        let err = GratitudeJournal::new(&store)
            .set_entry("5 Jan", "x")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_journal_reads_empty() {
        let store = MemoryStore::with_entries([(keys::GRATITUDE_BY_DATE, "not json")]);
        assert!(GratitudeJournal::new(&store).entries().is_empty());
    }

    #[test]
    fn coverage_counts_completed_days_with_notes() {
        let store = MemoryStore::new();
        let journal = GratitudeJournal::new(&store);
        journal.set_entry("2026-01-05", "a").unwrap();
        journal.set_entry("2026-01-06", "b").unwrap();
        journal.set_entry("2026-01-20", "c").unwrap();

        let days = ["2026-01-05", "2026-01-06", "2026-01-07", "2026-01-08"];
        let coverage = journal.coverage(&days);
        assert_eq!(coverage.total, 3);
        assert_eq!(coverage.completed_with_note, 2);
        assert_eq!(coverage.percent, 50);

        let none: [&str; 0] = [];
        assert_eq!(journal.coverage(&none).percent, 0);
    }

    #[test]
    fn clear_removes_key() {
        let store = MemoryStore::new();
        let journal = GratitudeJournal::new(&store);
        journal.set_entry("2026-01-05", "a").unwrap();
        journal.clear().unwrap();
        assert!(store.get(keys::GRATITUDE_BY_DATE).unwrap().is_none());
    }
}
