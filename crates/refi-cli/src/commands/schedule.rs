use clap::Args;
use serde_json::{json, Value};
use std::fs::File;
use std::io;

use refi_core::export::schedule_records;
use refi_core::schedule::{analyze_schedule, compute_schedule, LoanParameters};

use crate::calendar::StartMonth;
use crate::commands::open_book;
use crate::config::CliConfig;
use crate::input;
use crate::output::csv_out;

/// Arguments for building a schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON file with loan parameters
    #[arg(long, conflicts_with = "offer")]
    pub input: Option<String>,

    /// Index of a stored offer instead of a loan file
    #[arg(long)]
    pub offer: Option<usize>,
}

/// Arguments for exporting a schedule as CSV
#[derive(Args)]
pub struct ExportArgs {
    /// Path to a JSON file with loan parameters
    #[arg(long, conflicts_with = "offer")]
    pub input: Option<String>,

    /// Index of a stored offer instead of a loan file
    #[arg(long)]
    pub offer: Option<usize>,

    /// Month of the first installment (YYYY-MM)
    #[arg(long)]
    pub start_month: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

fn resolve_loan(
    path: Option<&str>,
    offer: Option<usize>,
    config: &CliConfig,
) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(index) = offer {
        let (book, _) = open_book(config)?;
        return Ok(book.get(index)?.loan_parameters());
    }
    input::read_input(path, "loan parameters")?
        .ok_or_else(|| "--input <loan.json>, --offer <index> or stdin required".into())
}

pub fn run_schedule(args: ScheduleArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_loan(args.input.as_deref(), args.offer, config)?;
    let result = analyze_schedule(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_export(args: ExportArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_loan(args.input.as_deref(), args.offer, config)?;
    let schedule = compute_schedule(&params)?;
    let start = StartMonth::resolve(args.start_month.as_deref().or(config.start_month.as_deref()))?;
    let records = schedule_records(&schedule, &start);

    match args.out {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            csv_out::write_schedule_csv(file, &records)?;
            tracing::info!(path = %path, rows = records.len(), "schedule exported");
            Ok(json!({ "path": path, "rows": records.len() }))
        }
        None => {
            csv_out::write_schedule_csv(io::stdout().lock(), &records)?;
            Ok(Value::Null)
        }
    }
}
