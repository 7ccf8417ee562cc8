//! Calendar-day helpers shared by every module that touches dates.
//!
//! Dates are persisted as `YYYY-MM-DD` strings. Lexicographic order on
//! that format equals chronological order, so sorted string sets are
//! used throughout instead of parsed dates.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Format used for persisted calendar days.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true when `s` matches `^\d{4}-\d{2}-\d{2}$`.
///
/// This is a shape check only: `2026-02-31` passes. Persisted data from
/// older installs was validated the same way.
pub fn is_valid_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Keep valid ISO dates only, deduplicated and sorted ascending.
pub fn sanitize_days<I, S>(days: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    days.into_iter()
        .filter(|d| is_valid_iso_date(d.as_ref()))
        .map(|d| d.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Same rule as [`sanitize_days`] applied to loosely-typed JSON: non-string
/// elements are dropped.
pub fn sanitize_json_days(values: &[serde_json::Value]) -> Vec<String> {
    sanitize_days(values.iter().filter_map(serde_json::Value::as_str))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if !is_valid_iso_date(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).ok()
}

/// The local calendar day an instant falls on.
///
/// The date is always taken after moving the instant into the local zone,
/// never from its UTC representation, so a timestamp near midnight does
/// not land on the neighbouring day.
pub fn calendar_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    calendar_day_in(instant, &Local)
}

/// [`calendar_day`] for an explicit zone.
pub fn calendar_day_in<Tz: TimeZone, Z: TimeZone>(instant: &DateTime<Tz>, zone: &Z) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

/// 12:00, the time of day used when a calendar day has to become an instant.
pub fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).expect("12:00:00 is a valid time of day")
}

/// Timestamp text in the same shape the app has always written:
/// RFC 3339, millisecond precision, `Z` suffix.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Source of "now" for code that needs wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The current local calendar day.
    fn today(&self) -> NaiveDate {
        calendar_day(&self.now())
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant and calendar day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: calendar_day(&now),
        }
    }

    /// Noon UTC on `date`, reporting `date` as today.
    pub fn on(date: NaiveDate) -> Self {
        let now = date.and_time(noon()).and_utc();
        Self { now, today: date }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
