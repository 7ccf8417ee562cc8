use std::io::Read;
use std::path::PathBuf;

use clap::Subcommand;
use jornada_core::backup::{
    export_backup, has_auto_backup, import_backup, last_backup_at, restore_auto_backup_now,
};
use jornada_core::{AutoBackup, Clock, Config, Database, ExportOptions, ProgressStore, SystemClock};
use serde_json::json;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write the automatic backup if it is due
    Auto,
    /// Restore the automatic backup once on a fresh install
    EnsureRestore,
    /// Replace progress with the automatic backup now
    Restore,
    /// Show automatic backup state
    Status,
    /// Export progress as JSON
    Export {
        /// Include user name and onboarding state
        #[arg(long)]
        with_profile: bool,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a JSON backup, replacing local progress
    Import {
        /// Backup file, or `-` for stdin
        #[arg(default_value = "-")]
        file: String,
    },
}

fn read_input(file: &str) -> std::io::Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(file)
    }
}

pub fn run(action: BackupAction) -> CliResult {
    let db = Database::open()?;

    match action {
        BackupAction::Auto => {
            let writer = AutoBackup::from_config(&Config::load_or_default());
            print_json(&writer.run_auto_backup(&db, SystemClock.now()))?;
        }
        BackupAction::EnsureRestore => {
            print_json(&ProgressStore::new(&db).ensure_auto_restore_once_if_needed())?;
        }
        BackupAction::Restore => {
            let outcome = restore_auto_backup_now(&db)?;
            if !outcome.restored {
                eprintln!("no usable automatic backup found");
            }
            print_json(&outcome)?;
        }
        BackupAction::Status => {
            let config = Config::load_or_default();
            print_json(&json!({
                "hasAutoBackup": has_auto_backup(&db),
                "lastBackupAt": last_backup_at(&db),
                "intervalDays": config.backup.auto_backup_interval_days,
                "autoRestoreDone": ProgressStore::new(&db).is_auto_restore_done(),
            }))?;
        }
        BackupAction::Export { with_profile, out } => {
            let options = ExportOptions {
                include_profile: with_profile,
            };
            let json = export_backup(&db, SystemClock.now(), options)?.to_pretty_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    eprintln!("backup written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        BackupAction::Import { file } => {
            let text = read_input(&file)?;
            print_json(&import_backup(&db, &text)?)?;
        }
    }
    Ok(())
}
