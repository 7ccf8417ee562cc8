//! Streak engine.
//!
//! A streak counts consecutive reading days walking backward from a given
//! calendar day. Sunday is the free day: it never breaks a streak and never
//! adds to it. All functions here are pure; the caller supplies the
//! reference day (see [`Clock::today`](crate::calendar::Clock::today)).

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::calendar::{format_iso_date, parse_iso_date};
use crate::plan::percent_of;

/// Day of the week that does not need a reading.
pub const FREE_DAY: Weekday = Weekday::Sun;

/// Readings expected per Sunday–Saturday week.
pub const WEEKLY_GOAL: u32 = 6;

pub fn is_free_day(date: NaiveDate) -> bool {
    date.weekday() == FREE_DAY
}

/// Number of consecutive non-free days ending at `as_of` that are present
/// in `completed_days`.
///
/// Free days are stepped over without being looked up, including `as_of`
/// itself. The walk stops at the first non-free day that is missing.
pub fn calculate_streak<S: AsRef<str>>(completed_days: &[S], as_of: NaiveDate) -> u32 {
    if completed_days.is_empty() {
        return 0;
    }

    let set: HashSet<&str> = completed_days.iter().map(AsRef::as_ref).collect();
    let mut day = as_of;
    let mut count = 0;

    loop {
        if !is_free_day(day) {
            if !set.contains(format_iso_date(day).as_str()) {
                break;
            }
            count += 1;
        }

        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }

    count
}

/// Latest completed day, if any.
pub fn last_read<S: AsRef<str>>(completed_days: &[S]) -> Option<String> {
    completed_days
        .iter()
        .map(AsRef::as_ref)
        .max()
        .map(str::to_string)
}

/// Sunday that opens the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Completed non-free days inside the Sunday–Saturday week containing
/// `as_of`. A reading logged on the free day does not count.
pub fn weekly_count<S: AsRef<str>>(completed_days: &[S], as_of: NaiveDate) -> u32 {
    let start = week_start(as_of);
    let end = start + Duration::days(6);

    let count = completed_days
        .iter()
        .filter_map(|d| parse_iso_date(d.as_ref()))
        .filter(|d| !is_free_day(*d) && *d >= start && *d <= end)
        .collect::<HashSet<_>>()
        .len();
    count as u32
}

/// Weekly progress toward [`WEEKLY_GOAL`], 0–100.
pub fn weekly_percent(weekly_count: u32) -> u32 {
    percent_of(weekly_count as usize, WEEKLY_GOAL as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn empty_set_has_no_streak() {
        let none: [&str; 0] = [];
        assert_eq!(calculate_streak(&none, date("2026-01-08")), 0);
    }

    #[test]
    fn gapless_run_across_a_sunday() {
        // Thu 01-08, Fri 01-09, Sat 01-10, (Sun 01-11 free), Mon 01-12, Tue 01-13
        let days = ["2026-01-08", "2026-01-09", "2026-01-10", "2026-01-12", "2026-01-13"];
        assert_eq!(date("2026-01-11").weekday(), Weekday::Sun);
        assert_eq!(calculate_streak(&days, date("2026-01-13")), 5);
    }

    #[test]
    fn consecutive_weekdays_without_sunday() {
        let days = ["2026-01-05", "2026-01-06", "2026-01-07", "2026-01-08"];
        assert_eq!(calculate_streak(&days, date("2026-01-08")), 4);
    }

    #[test]
    fn gap_ends_the_streak() {
        // 01-07 missing
        let days = ["2026-01-05", "2026-01-06", "2026-01-08"];
        assert_eq!(calculate_streak(&days, date("2026-01-08")), 1);
    }

    #[test]
    fn missing_today_means_zero() {
        let days = ["2026-01-05", "2026-01-06"];
        assert_eq!(calculate_streak(&days, date("2026-01-07")), 0);
    }

    #[test]
    fn as_of_on_free_day_counts_from_saturday() {
        // Sun 01-11 absent, walk continues from Sat 01-10.
        let days = ["2026-01-08", "2026-01-09", "2026-01-10"];
        assert_eq!(calculate_streak(&days, date("2026-01-11")), 3);
    }

    #[test]
    fn reading_on_free_day_does_not_add() {
        let days = ["2026-01-10", "2026-01-11", "2026-01-12"];
        assert_eq!(calculate_streak(&days, date("2026-01-12")), 2);
    }

    #[test]
    fn only_sundays_give_zero() {
        let days = ["2026-01-04", "2026-01-11"];
        assert_eq!(calculate_streak(&days, date("2026-01-11")), 0);
    }

    #[test]
    fn foreign_entries_never_match() {
        let days = ["garbage", "2026-1-8"];
        assert_eq!(calculate_streak(&days, date("2026-01-08")), 0);
    }

    #[test]
    fn last_read_is_latest_entry() {
        let days = vec!["2026-01-06".to_string(), "2026-02-01".to_string(), "2026-01-31".to_string()];
        assert_eq!(last_read(&days).as_deref(), Some("2026-02-01"));
        let none: Vec<String> = Vec::new();
        assert_eq!(last_read(&none), None);
    }

    #[test]
    fn weekly_count_excludes_sunday_and_other_weeks() {
        // Week of Sun 01-11 .. Sat 01-17
        let days = [
            "2026-01-10", // previous week
            "2026-01-11", // Sunday, free
            "2026-01-12",
            "2026-01-14",
            "2026-01-17",
            "2026-01-18", // next week
        ];
        assert_eq!(weekly_count(&days, date("2026-01-14")), 3);
        assert_eq!(weekly_count(&days, date("2026-01-11")), 3);
        assert_eq!(weekly_percent(3), 50);
        assert_eq!(weekly_percent(9), 100);
    }

    #[test]
    fn week_start_is_sunday() {
        assert_eq!(week_start(date("2026-01-14")), date("2026-01-11"));
        assert_eq!(week_start(date("2026-01-11")), date("2026-01-11"));
    }

    fn arb_day() -> impl Strategy<Value = NaiveDate> {
        (0i64..120).prop_map(|offset| date("2026-01-01") + Duration::days(offset))
    }

    proptest! {
        #[test]
        fn streak_bounded_by_non_free_days(
            picks in proptest::collection::vec(arb_day(), 0..80),
            as_of in arb_day(),
        ) {
            let days: Vec<String> = picks.iter().map(|d| format_iso_date(*d)).collect();
            let streak = calculate_streak(&days, as_of);

            let earliest = picks.iter().min().copied().unwrap_or(as_of);
            let mut non_free = 0u32;
            let mut d = earliest;
            while d <= as_of {
                if !is_free_day(d) {
                    non_free += 1;
                }
                d = d.succ_opt().unwrap();
            }
            prop_assert!(streak <= non_free);
            prop_assert!(streak as usize <= days.len());
        }

        #[test]
        fn free_day_as_of_matches_previous_day(
            picks in proptest::collection::vec(arb_day(), 0..80),
            as_of in arb_day(),
        ) {
            let days: Vec<String> = picks.iter().map(|d| format_iso_date(*d)).collect();
            if is_free_day(as_of) {
                let prev = as_of.pred_opt().unwrap();
                prop_assert_eq!(calculate_streak(&days, as_of), calculate_streak(&days, prev));
            }
        }
    }
}
