//! Reading plan reference data and the progress summaries derived from it.
//!
//! The plan is read-only input: an ordered list of daily readings and the
//! phases that group them. It is loaded from a JSON document:
//!
//! ```json
//! {
//!   "days":   [{ "date": "2026-01-05", "reference": "Gênesis 1-3", "isSunday": false }],
//!   "phases": [{ "id": 1, "title": "Foundations", "startDate": "2026-01-05", "endDate": "2026-02-15" }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{format_iso_date, parse_iso_date};
use crate::error::{CoreError, Result};

/// `part / whole` as a whole percentage, rounded and clamped to 0–100.
///
/// An empty whole is 0%.
pub fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = (part as f64 / whole as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// One scheduled reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDay {
    pub date: String,
    pub reference: String,
    #[serde(default)]
    pub is_sunday: bool,
}

impl ReadingDay {
    /// Meditation days carry no reading to check off.
    pub fn is_meditation(&self) -> bool {
        self.is_sunday || self.reference.to_lowercase().contains("meditar")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messianic_connection: Option<String>,
}

impl Phase {
    pub fn contains(&self, date: &str) -> bool {
        self.start_date.as_str() <= date && date <= self.end_date.as_str()
    }
}

/// Where a calendar day sits relative to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPosition {
    BeforePlan,
    InProgress,
    AfterPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// Completed days falling in the month.
    pub completed: usize,
    /// Non-Sunday readings scheduled in the month.
    pub planned: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSummary {
    pub completed: usize,
    pub planned: usize,
    pub remaining: usize,
    pub percent: u32,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    pub reference: String,
}

/// One `YYYY-MM` group of [`HistoryEntry`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryMonth {
    pub month: String,
    pub entries: Vec<HistoryEntry>,
}

/// Encouragement keyed on overall plan completion.
pub fn completion_message(percent: u32) -> &'static str {
    match percent {
        0 => "Every great journey starts with a single step.",
        1..=24 => "Keep going! God honors faithfulness.",
        25..=49 => "You have come a long way already. Persevere!",
        50..=74 => "The journey is blossoming. Don't give up!",
        75..=99 => "You are very close to the finish!",
        _ => "Congratulations! You completed the Jornada Bíblica 🎉",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPlan {
    #[serde(default)]
    pub days: Vec<ReadingDay>,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl ReadingPlan {
    pub fn new(days: Vec<ReadingDay>, phases: Vec<Phase>) -> Self {
        Self { days, phases }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Plan(format!("invalid plan document: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Plan(format!("cannot read {}: {e}", path.display())))?;
        let plan = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), days = plan.days.len(), "reading plan loaded");
        Ok(plan)
    }

    /// First and last scheduled date, or `None` for an empty plan.
    pub fn range(&self) -> Option<PlanRange> {
        let start = self.days.iter().map(|d| d.date.as_str()).min()?;
        let end = self.days.iter().map(|d| d.date.as_str()).max()?;
        Some(PlanRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// An empty plan puts every day in progress.
    pub fn position(&self, date: NaiveDate) -> PlanPosition {
        let Some(range) = self.range() else {
            return PlanPosition::InProgress;
        };
        let day = format_iso_date(date);
        if day < range.start {
            PlanPosition::BeforePlan
        } else if day > range.end {
            PlanPosition::AfterPlan
        } else {
            PlanPosition::InProgress
        }
    }

    pub fn reading_for(&self, date: &str) -> Option<&ReadingDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn phase_for(&self, date: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.contains(date))
    }

    /// Readings scheduled immediately before and after `date`.
    pub fn neighbors(&self, date: &str) -> (Option<&ReadingDay>, Option<&ReadingDay>) {
        let Some(idx) = self.days.iter().position(|d| d.date == date) else {
            return (None, None);
        };
        let prev = idx.checked_sub(1).and_then(|i| self.days.get(i));
        (prev, self.days.get(idx + 1))
    }

    /// Readings that count toward completion (Sundays excluded).
    pub fn countable_days(&self) -> usize {
        self.days.iter().filter(|d| !d.is_sunday).count()
    }

    /// Whether `date` is a day the reader can check off.
    pub fn can_mark_complete(&self, date: &str) -> bool {
        let Some(day) = parse_iso_date(date) else {
            return false;
        };
        if self.position(day) != PlanPosition::InProgress {
            return false;
        }
        self.reading_for(date).is_some_and(|r| !r.is_meditation())
    }

    pub fn monthly_summary<S: AsRef<str>>(&self, completed: &[S], year: i32, month: u32) -> MonthlySummary {
        let in_month = |date: &str| {
            parse_iso_date(date).is_some_and(|d| d.year() == year && d.month() == month)
        };

        let planned = self
            .days
            .iter()
            .filter(|d| !d.is_sunday && in_month(&d.date))
            .count();
        let completed = completed.iter().filter(|d| in_month(d.as_ref())).count();

        MonthlySummary {
            year,
            month,
            completed,
            planned,
            percent: percent_of(completed, planned),
        }
    }

    pub fn annual_summary<S: AsRef<str>>(&self, completed: &[S]) -> AnnualSummary {
        let planned = self.countable_days();
        let percent = percent_of(completed.len(), planned);
        AnnualSummary {
            completed: completed.len(),
            planned,
            remaining: planned.saturating_sub(completed.len()),
            percent,
            message: completion_message(percent),
        }
    }

    /// Completed readings grouped by `YYYY-MM`, newest month first and
    /// newest day first within each month. Completed days without a
    /// scheduled reading are left out.
    pub fn history<S: AsRef<str>>(&self, completed: &[S]) -> Vec<HistoryMonth> {
        let done: HashSet<&str> = completed.iter().map(AsRef::as_ref).collect();

        let mut readings: Vec<&ReadingDay> = self
            .days
            .iter()
            .filter(|d| done.contains(d.date.as_str()))
            .collect();
        readings.sort_by(|a, b| b.date.cmp(&a.date));

        let mut grouped: Vec<HistoryMonth> = Vec::new();
        for reading in readings {
            let month = reading.date.get(..7).unwrap_or(&reading.date);
            let entry = HistoryEntry {
                date: reading.date.clone(),
                reference: reading.reference.clone(),
            };
            match grouped.last_mut() {
                Some(group) if group.month == month => group.entries.push(entry),
                _ => grouped.push(HistoryMonth {
                    month: month.to_string(),
                    entries: vec![entry],
                }),
            }
        }
        grouped
    }
}
