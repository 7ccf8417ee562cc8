use std::path::PathBuf;

use clap::Subcommand;
use jornada_core::calendar::format_iso_date;
use jornada_core::reading::{open_in_browser, reading_url};
use jornada_core::{BibleVersion, Config, CoreError, Database, ProgressStore};
use serde_json::json;

use super::{day_or_today, load_plan, print_json, CliResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Reading, phase and status for a day
    Today {
        /// Day to look up (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Completed readings grouped by month
    History,
    /// Passage link for a reference
    Url {
        /// Bible reference, e.g. "Gênesis 1-3"
        reference: String,
        /// Translation (arc or nvi, default: configured)
        #[arg(long)]
        version: Option<BibleVersion>,
        /// Treat as a Sunday meditation
        #[arg(long)]
        sunday: bool,
    },
    /// Open the day's passage in the browser
    Open {
        /// Day to open (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: PlanAction, plan_path: Option<PathBuf>) -> CliResult {
    let config = Config::load_or_default();
    let version = config.reading.bible_version;

    match action {
        PlanAction::Today { as_of } => {
            let plan = load_plan(&config, plan_path.as_deref())?;
            let day = day_or_today(as_of.as_deref())?;
            let date = format_iso_date(day);
            let reading = plan.reading_for(&date);

            let db = Database::open()?;
            let completed = ProgressStore::new(&db).completed_days();

            print_json(&json!({
                "date": date,
                "position": plan.position(day),
                "reading": reading,
                "phase": plan.phase_for(&date),
                "canMarkComplete": plan.can_mark_complete(&date),
                "completed": completed.contains(&date),
                "url": reading.map(|r| reading_url(&r.reference, r.is_sunday, version)),
            }))?;
        }
        PlanAction::History => {
            let plan = load_plan(&config, plan_path.as_deref())?;
            let db = Database::open()?;
            let completed = ProgressStore::new(&db).completed_days();
            print_json(&plan.history(&completed))?;
        }
        PlanAction::Url {
            reference,
            version: requested,
            sunday,
        } => {
            println!("{}", reading_url(&reference, sunday, requested.unwrap_or(version)));
        }
        PlanAction::Open { as_of } => {
            let plan = load_plan(&config, plan_path.as_deref())?;
            let date = format_iso_date(day_or_today(as_of.as_deref())?);
            let reading = plan
                .reading_for(&date)
                .ok_or_else(|| CoreError::Plan(format!("no reading scheduled for {date}")))?;
            let url = reading_url(&reading.reference, reading.is_sunday, version);
            open_in_browser(&url)?;
            println!("{url}");
        }
    }
    Ok(())
}
