pub mod backup;
pub mod config;
pub mod gratitude;
pub mod plan;
pub mod progress;
pub mod stats;

use std::path::Path;

use chrono::NaiveDate;
use jornada_core::calendar::parse_iso_date;
use jornada_core::{
    AutoBackup, Clock, Config, CoreError, Database, ProgressStore, ReadingPlan, SystemClock,
};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Launch-time lifecycle: restore once on a fresh install, then write
/// the automatic backup if it is due. Failures are logged, never fatal.
pub fn on_launch() {
    let db = match Database::open() {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!(error = %e, "skipping launch backup");
            return;
        }
    };
    ProgressStore::new(&db).ensure_auto_restore_once_if_needed();
    let writer = AutoBackup::from_config(&Config::load_or_default());
    let outcome = writer.run_auto_backup(&db, SystemClock.now());
    tracing::debug!(?outcome, "launch backup");
}

/// `--date`/`--as-of` argument, defaulting to today's local date.
pub fn day_or_today(arg: Option<&str>) -> Result<NaiveDate, CoreError> {
    match arg {
        Some(s) => parse_iso_date(s).ok_or_else(|| CoreError::InvalidDate(s.to_string())),
        None => Ok(SystemClock.today()),
    }
}

/// Plan from `--plan`, else from `reading.plan_path`.
pub fn load_plan(config: &Config, explicit: Option<&Path>) -> Result<ReadingPlan, CoreError> {
    if let Some(path) = explicit {
        return ReadingPlan::load(path);
    }
    match &config.reading.plan_path {
        Some(path) => ReadingPlan::load(Path::new(path)),
        None => Err(CoreError::Plan(
            "no reading plan configured; pass --plan or set reading.plan_path".to_string(),
        )),
    }
}

/// Configured plan if there is one. A broken plan file is logged and
/// treated as absent.
pub fn configured_plan(config: &Config) -> Option<ReadingPlan> {
    let path = config.reading.plan_path.as_deref()?;
    match ReadingPlan::load(Path::new(path)) {
        Ok(plan) => Some(plan),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring reading plan");
            None
        }
    }
}
