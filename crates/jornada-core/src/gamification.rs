//! Levels, milestones and the daily message derived from a streak.
//!
//! Every function accepts anything convertible to `f64` and normalizes it
//! (floor, negatives and NaN become 0), so callers can pass raw values
//! without pre-validating them.

use serde::Serialize;

/// One rung of the level ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub min_streak: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
}

/// Ascending by `min_streak`; the first rung starts at 0.
pub const LEVELS: &[Level] = &[
    Level { min_streak: 0, title: "Fresh Start", subtitle: "One day at a time.", icon: "🌱" },
    Level { min_streak: 3, title: "Steady", subtitle: "Discipline is taking root.", icon: "🔥" },
    Level { min_streak: 7, title: "Disciplined", subtitle: "A firm week.", icon: "🚀" },
    Level { min_streak: 14, title: "Persevering", subtitle: "You are growing roots.", icon: "⚔️" },
    Level { min_streak: 30, title: "Sower", subtitle: "Mature consistency.", icon: "🌿" },
    Level { min_streak: 60, title: "Rooted in the Word", subtitle: "You no longer depend on mood.", icon: "🌳" },
    Level { min_streak: 90, title: "Unshakable", subtitle: "A settled habit.", icon: "🏔️" },
    Level { min_streak: 180, title: "Living Testimony", subtitle: "Your life already shows discipline.", icon: "👑" },
    Level { min_streak: 365, title: "Journey Complete", subtitle: "A year of faithfulness.", icon: "🏆" },
];

/// Streak lengths that earn a congratulation, ascending.
pub const MILESTONES: &[u32] = &[3, 7, 14, 21, 30, 45, 60, 90, 120, 180, 365];

/// Level reached by a streak, together with the normalized streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub streak: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
    pub min_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMilestone {
    /// Smallest milestone strictly above the streak; `None` past the last.
    pub next: Option<u32>,
    /// `next - streak`, or 0 when there is no next milestone.
    pub remaining: u32,
}

/// Inputs for [`daily_message`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyMessageParams {
    pub streak: f64,
    pub is_before_plan: bool,
    pub is_after_plan: bool,
}

/// Floor and clamp to zero. NaN becomes 0.
pub fn normalize_streak(raw: impl Into<f64>) -> u32 {
    let raw = raw.into();
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX for huge or infinite values.
    raw.floor() as u32
}

pub fn level_for_streak(streak: impl Into<f64>) -> LevelInfo {
    let s = normalize_streak(streak);
    let level = LEVELS
        .iter()
        .rev()
        .find(|l| s >= l.min_streak)
        .unwrap_or(&LEVELS[0]);

    LevelInfo {
        streak: s,
        title: level.title,
        subtitle: level.subtitle,
        icon: level.icon,
        min_streak: level.min_streak,
    }
}

pub fn next_milestone(streak: impl Into<f64>) -> NextMilestone {
    let s = normalize_streak(streak);
    let next = MILESTONES.iter().copied().find(|m| *m > s);
    NextMilestone {
        next,
        remaining: next.map_or(0, |m| m - s),
    }
}

pub fn is_milestone(streak: impl Into<f64>) -> bool {
    MILESTONES.contains(&normalize_streak(streak))
}

/// Short message for the home view.
///
/// Plan boundaries take priority over the streak bands.
pub fn daily_message(params: DailyMessageParams) -> &'static str {
    if params.is_before_plan {
        return "The plan has not started yet. Prepare your heart and your routine.";
    }
    if params.is_after_plan {
        return "The plan is finished. Reread, consolidate and keep the habit.";
    }

    match normalize_streak(params.streak) {
        0 => "Start again today. Simple and direct.",
        1..=2 => "Consistency beats intensity. Do the basics well.",
        3..=6 => "You are forming a habit. Protect your reading time.",
        7..=13 => "A solid week. Now keep going without bargaining.",
        14..=29 => "Real perseverance: continuing even without feeling like it.",
        _ => "Mature discipline. Keep going, without anxiety.",
    }
}

/// Congratulation shown when a streak lands exactly on a milestone.
pub fn milestone_message(milestone: u32) -> String {
    match milestone {
        3 => "3 days: you broke out of inertia.".to_string(),
        7 => "7 days: one firm week.".to_string(),
        14 => "14 days: a habit in the making.".to_string(),
        21 => "21 days: visible consistency.".to_string(),
        30 => "30 days: discipline consolidating.".to_string(),
        60 => "60 days: rare firmness. Keep going.".to_string(),
        90 => "90 days: an established habit.".to_string(),
        180 => "180 days: you are different now.".to_string(),
        365 => "365 days: journey complete.".to_string(),
        other => format!("{other} days: milestone reached."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_ascending_and_starts_at_zero() {
        assert_eq!(LEVELS[0].min_streak, 0);
        assert!(LEVELS.windows(2).all(|w| w[0].min_streak < w[1].min_streak));
        assert!(MILESTONES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn level_picks_highest_reached_rung() {
        assert_eq!(level_for_streak(0u32).title, "Fresh Start");
        assert_eq!(level_for_streak(2u32).title, "Fresh Start");
        assert_eq!(level_for_streak(3u32).title, "Steady");
        assert_eq!(level_for_streak(29u32).min_streak, 14);
        assert_eq!(level_for_streak(30u32).title, "Sower");
        assert_eq!(level_for_streak(364u32).title, "Living Testimony");
        assert_eq!(level_for_streak(1000u32).title, "Journey Complete");
    }

    #[test]
    fn inputs_are_floored_and_clamped() {
        assert_eq!(level_for_streak(-5i32).streak, 0);
        assert_eq!(level_for_streak(6.9f64).streak, 6);
        assert_eq!(level_for_streak(f64::NAN).title, "Fresh Start");
        assert_eq!(normalize_streak(f64::INFINITY), u32::MAX);
        assert_eq!(next_milestone(2.99f64).next, Some(3));
        assert!(is_milestone(7.5f64));
        assert!(!is_milestone(-3i32));
    }

    #[test]
    fn next_milestone_is_strictly_greater() {
        assert_eq!(next_milestone(0u32), NextMilestone { next: Some(3), remaining: 3 });
        assert_eq!(next_milestone(3u32), NextMilestone { next: Some(7), remaining: 4 });
        assert_eq!(next_milestone(364u32), NextMilestone { next: Some(365), remaining: 1 });
        assert_eq!(next_milestone(365u32), NextMilestone { next: None, remaining: 0 });
        assert_eq!(next_milestone(4000u32), NextMilestone { next: None, remaining: 0 });
    }

    #[test]
    fn next_milestone_remaining_matches_distance() {
        for s in 0u32..400 {
            let m = next_milestone(s);
            match m.next {
                Some(next) => {
                    assert!(next > s);
                    assert_eq!(m.remaining, next - s);
                }
                None => assert_eq!(m.remaining, 0),
            }
        }
    }

    #[test]
    fn milestone_membership_is_exact() {
        for m in MILESTONES {
            assert!(is_milestone(*m));
        }
        assert!(!is_milestone(0u32));
        assert!(!is_milestone(8u32));
    }

    #[test]
    fn daily_message_plan_state_wins() {
        let before = daily_message(DailyMessageParams {
            streak: 50.0,
            is_before_plan: true,
            is_after_plan: true,
        });
        assert!(before.starts_with("The plan has not started"));

        let after = daily_message(DailyMessageParams {
            streak: 50.0,
            is_after_plan: true,
            ..Default::default()
        });
        assert!(after.starts_with("The plan is finished"));
    }

    #[test]
    fn daily_message_bands() {
        let msg = |streak: f64| {
            daily_message(DailyMessageParams {
                streak,
                ..Default::default()
            })
        };
        assert_eq!(msg(0.0), "Start again today. Simple and direct.");
        assert_eq!(msg(2.0), msg(1.0));
        assert_ne!(msg(2.0), msg(3.0));
        assert_eq!(msg(6.0), msg(3.0));
        assert_ne!(msg(6.0), msg(7.0));
        assert_eq!(msg(13.0), msg(7.0));
        assert_ne!(msg(13.0), msg(14.0));
        assert_eq!(msg(29.0), msg(14.0));
        assert_ne!(msg(29.0), msg(30.0));
        assert_eq!(msg(500.0), msg(30.0));
        assert_eq!(msg(-1.0), msg(0.0));
    }

    #[test]
    fn milestone_messages() {
        assert_eq!(milestone_message(7), "7 days: one firm week.");
        assert_eq!(milestone_message(45), "45 days: milestone reached.");
    }
}
