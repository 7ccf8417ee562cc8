//! # Jornada Core Library
//!
//! Core logic for Jornada Bíblica, a one-year Bible reading companion.
//! Everything the app does with a reader's progress lives here; the
//! `jornada` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Calendar & streak**: pure date logic. Sundays are free days that
//!   neither break nor extend a streak. The current calendar day is
//!   passed in, never read from a global clock.
//! - **Progress store**: the set of completed days over a [`KvStore`],
//!   re-read on every call.
//! - **Backup**: a cadence-limited automatic snapshot, a one-shot
//!   restore on fresh installs, and manual JSON export/import.
//! - **Gamification**: levels, milestones and daily messages derived from
//!   the streak.
//! - **Storage**: SQLite-backed key-value table and TOML configuration.
//!
//! ## Key Components
//!
//! - [`ProgressStore`]: completed days and the auto-restore guard
//! - [`AutoBackup`]: automatic snapshot writer
//! - [`Database`]: durable key-value store
//! - [`Config`]: application configuration

pub mod backup;
pub mod calendar;
pub mod error;
pub mod gamification;
pub mod gratitude;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod reading;
pub mod storage;
pub mod streak;

pub use backup::{AutoBackup, AutoBackupOutcome, ExportOptions, ImportSummary, ManualBackupPayload};
pub use calendar::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, ImportError, StorageError};
pub use gamification::{DailyMessageParams, LevelInfo, NextMilestone};
pub use gratitude::GratitudeJournal;
pub use plan::{PlanPosition, ReadingPlan};
pub use profile::{Profile, ProfileStore};
pub use progress::{AddOutcome, ProgressStore, RestoreOutcome};
pub use reading::BibleVersion;
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use streak::calculate_streak;
