use anyhow::Result;
use chrono::NaiveDate;
use ck_cli::commands::costs::execute_costs;
use ck_cli::commands::init::execute_init;
use ck_cli::commands::migrate::{execute_migrate, MigrateOptions};
use ck_cli::commands::schedule::{execute_schedule, ScheduleOptions};
use ck_cli::config::DEFAULT_CONFIG_FILE;
use ck_cli::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contract-keeper", version, about = "Payment schedules and legacy record migration for recurring contracts")]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Shortcut for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file
    Init {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: String,
    },
    /// Upgrade stored records to the current schema
    Migrate {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
        /// Report format (defaults to [output] format)
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
        /// Write the report without touching record files
        #[arg(long)]
        dry_run: bool,
        /// Reference date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// List upcoming payments of active contracts
    Schedule {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
        /// Only show this contract
        #[arg(long)]
        id: Option<String>,
        /// Number of payments per contract
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Reference date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Summarise recurring costs per currency and category
    Costs {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ck_core::init_from_args(cli.log_level, cli.log_file, cli.verbose)?;

    match cli.command {
        Commands::Init { path } => execute_init(&path)?,
        Commands::Migrate {
            config,
            format,
            dry_run,
            as_of,
        } => {
            let options = MigrateOptions {
                format,
                dry_run,
                as_of,
            };
            execute_migrate(&config, &options)?;
        }
        Commands::Schedule {
            config,
            id,
            count,
            as_of,
        } => {
            let options = ScheduleOptions { id, count, as_of };
            execute_schedule(&config, &options)?;
        }
        Commands::Costs { config } => {
            execute_costs(&config)?;
        }
    }

    Ok(())
}
