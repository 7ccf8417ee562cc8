use clap::Subcommand;
use jornada_core::calendar::format_iso_date;
use jornada_core::gamification::{is_milestone, milestone_message};
use jornada_core::streak::{last_read, weekly_count, weekly_percent, WEEKLY_GOAL};
use jornada_core::{calculate_streak, Database, GratitudeJournal, ProgressStore};
use serde_json::json;

use super::{day_or_today, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// List completed days
    List,
    /// Mark a day as read
    Mark {
        /// Day to mark (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Current streak and weekly goal
    Streak {
        /// Compute as of this day (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Clear all completed days
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
        /// Also clear the gratitude journal
        #[arg(long)]
        with_gratitude: bool,
    },
}

pub fn run(action: ProgressAction) -> CliResult {
    let db = Database::open()?;
    let progress = ProgressStore::new(&db);

    match action {
        ProgressAction::List => {
            let days = progress.completed_days();
            print_json(&json!({
                "count": days.len(),
                "lastRead": last_read(&days),
                "completedDays": days,
            }))?;
        }
        ProgressAction::Mark { date } => {
            let day = day_or_today(date.as_deref())?;
            let date = format_iso_date(day);

            let outcome = progress.add_completed_day(&date)?;
            let streak = calculate_streak(&outcome.days, day);
            let milestone = (outcome.added && is_milestone(streak)).then(|| milestone_message(streak));

            print_json(&json!({
                "date": date,
                "added": outcome.added,
                "count": outcome.days.len(),
                "streak": streak,
                "milestone": milestone,
            }))?;
        }
        ProgressAction::Streak { as_of } => {
            let as_of = day_or_today(as_of.as_deref())?;
            let days = progress.completed_days();
            let week = weekly_count(&days, as_of);
            print_json(&json!({
                "asOf": format_iso_date(as_of),
                "streak": calculate_streak(&days, as_of),
                "lastRead": last_read(&days),
                "weeklyCount": week,
                "weeklyGoal": WEEKLY_GOAL,
                "weeklyPercent": weekly_percent(week),
            }))?;
        }
        ProgressAction::Reset { yes, with_gratitude } => {
            if !yes {
                return Err("refusing to reset progress without --yes".into());
            }
            progress.reset_progress()?;
            if with_gratitude {
                GratitudeJournal::new(&db).clear()?;
            }
            println!("progress reset");
        }
    }
    Ok(())
}
