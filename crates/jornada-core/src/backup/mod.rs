//! Automatic and manual backups of reading progress.
//!
//! - [`auto`]: a tagged snapshot written on a cadence, restored once per
//!   install or on request.
//! - [`manual`]: the user-facing JSON export/import payload.

pub mod auto;
pub mod manual;

pub use auto::{
    has_auto_backup, last_backup_at, restore_auto_backup_now, restore_from_auto_backup,
    AutoBackup, AutoBackupOutcome, AutoBackupRecord, AUTO_BACKUP_APP, AUTO_BACKUP_TYPE,
};
pub use manual::{export_backup, import_backup, ExportOptions, ImportSummary, ManualBackupPayload};
