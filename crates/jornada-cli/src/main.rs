use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "jornada", version, about = "Jornada Bíblica CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Completed days and streak
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Level, milestones and summaries
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Automatic and manual backups
    Backup {
        #[command(subcommand)]
        action: commands::backup::BackupAction,
    },
    /// Gratitude journal
    Gratitude {
        #[command(subcommand)]
        action: commands::gratitude::GratitudeAction,
    },
    /// Reading plan lookups and passage links
    Plan {
        /// Reading plan JSON file (overrides `reading.plan_path`)
        #[arg(long, global = true)]
        plan: Option<std::path::PathBuf>,
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("JORNADA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    // `backup` drives the same lifecycle by hand; `config` never touches state.
    if !matches!(cli.command, Commands::Backup { .. } | Commands::Config { .. }) {
        commands::on_launch();
    }
    let result = match cli.command {
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Backup { action } => commands::backup::run(action),
        Commands::Gratitude { action } => commands::gratitude::run(action),
        Commands::Plan { plan, action } => commands::plan::run(action, plan),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
