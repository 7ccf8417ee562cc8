use chrono::Datelike;
use clap::Subcommand;
use jornada_core::calendar::format_iso_date;
use jornada_core::gamification::{
    daily_message, is_milestone, level_for_streak, milestone_message, next_milestone,
    normalize_streak,
};
use jornada_core::streak::{weekly_count, weekly_percent, WEEKLY_GOAL};
use jornada_core::{
    calculate_streak, Config, DailyMessageParams, Database, GratitudeJournal, PlanPosition,
    ProgressStore,
};
use serde_json::json;

use super::{configured_plan, day_or_today, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Streak, level, weekly goal and plan completion
    Summary {
        /// Compute as of this day (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Level and next milestone for a given streak
    Level {
        /// Streak length
        #[arg(allow_negative_numbers = true)]
        streak: f64,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    match action {
        StatsAction::Summary { as_of } => {
            let as_of = day_or_today(as_of.as_deref())?;
            let db = Database::open()?;
            let config = Config::load_or_default();

            let days = ProgressStore::new(&db).completed_days();
            let streak = calculate_streak(&days, as_of);
            let week = weekly_count(&days, as_of);
            let plan = configured_plan(&config);
            let position = plan.as_ref().map(|p| p.position(as_of));

            let message = daily_message(DailyMessageParams {
                streak: f64::from(streak),
                is_before_plan: position == Some(PlanPosition::BeforePlan),
                is_after_plan: position == Some(PlanPosition::AfterPlan),
            });

            print_json(&json!({
                "asOf": format_iso_date(as_of),
                "streak": streak,
                "level": level_for_streak(streak),
                "nextMilestone": next_milestone(streak),
                "dailyMessage": message,
                "weekly": {
                    "count": week,
                    "goal": WEEKLY_GOAL,
                    "percent": weekly_percent(week),
                },
                "gratitude": GratitudeJournal::new(&db).coverage(&days),
                "plan": plan.map(|p| json!({
                    "position": position,
                    "monthly": p.monthly_summary(&days, as_of.year(), as_of.month()),
                    "annual": p.annual_summary(&days),
                })),
            }))?;
        }
        StatsAction::Level { streak } => {
            let normalized = normalize_streak(streak);
            print_json(&json!({
                "level": level_for_streak(streak),
                "nextMilestone": next_milestone(streak),
                "isMilestone": is_milestone(streak),
                "milestoneMessage": is_milestone(streak).then(|| milestone_message(normalized)),
            }))?;
        }
    }
    Ok(())
}
