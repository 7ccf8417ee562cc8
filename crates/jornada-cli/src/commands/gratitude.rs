use clap::Subcommand;
use jornada_core::calendar::format_iso_date;
use jornada_core::{Database, GratitudeJournal};
use serde_json::json;

use super::{day_or_today, print_json, CliResult};

#[derive(Subcommand)]
pub enum GratitudeAction {
    /// Write the note for a day (an empty note removes it)
    Add {
        /// Note text, at most 200 characters are kept
        text: String,
        /// Day of the note (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the note for a day
    Show {
        /// Day (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List all notes
    List,
}

pub fn run(action: GratitudeAction) -> CliResult {
    let db = Database::open()?;
    let journal = GratitudeJournal::new(&db);

    match action {
        GratitudeAction::Add { text, date } => {
            let date = format_iso_date(day_or_today(date.as_deref())?);
            let note = journal.set_entry(&date, &text)?;
            print_json(&json!({ "date": date, "note": note }))?;
        }
        GratitudeAction::Show { date } => {
            let date = format_iso_date(day_or_today(date.as_deref())?);
            let note = journal.entry_for(&date);
            print_json(&json!({ "date": date, "note": note }))?;
        }
        GratitudeAction::List => {
            print_json(&journal.entries())?;
        }
    }
    Ok(())
}
