mod calendar;
mod commands;
mod config;
mod input;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::compare::CompareArgs;
use commands::offers::OffersCommand;
use commands::schedule::{ExportArgs, ScheduleArgs};
use config::CliConfig;

/// Mortgage refinancing comparison
#[derive(Parser)]
#[command(
    name = "refi",
    version,
    about = "Compare mortgage refinancing offers",
    long_about = "Builds month-by-month amortization schedules for loans with stepped \
                  promotional rates, fixed installments and prepayments, and compares \
                  lenders' offers on interest paid over the first years plus fees."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a TOML config file (defaults to ./refi.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the amortization schedule of a loan or stored offer
    Schedule(ScheduleArgs),
    /// Write a schedule as CSV, one line per month
    Export(ExportArgs),
    /// Compare offers on interest over the first years plus other costs
    Compare(CompareArgs),
    /// Manage the stored offer list
    #[command(subcommand)]
    Offers(OffersCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("refi=debug,refi_core=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("refi=warn,refi_core=warn"))
    };

    // stdout carries results; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args, &config),
        Commands::Export(args) => commands::schedule::run_export(args, &config),
        Commands::Compare(args) => commands::compare::run_compare(args, &config),
        Commands::Offers(cmd) => commands::offers::run_offers(cmd, &config),
        Commands::Version => {
            println!("refi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(serde_json::Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
