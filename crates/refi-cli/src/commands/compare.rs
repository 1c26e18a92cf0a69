use clap::Args;
use serde_json::Value;

use refi_core::comparison::{analyze_offers, Offer};

use crate::commands::open_book;
use crate::config::CliConfig;
use crate::input;

/// Arguments for comparing offers
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON array of offers (defaults to the stored list)
    #[arg(long)]
    pub input: Option<String>,

    /// Months of interest to compare (defaults to config, 36)
    #[arg(long)]
    pub window: Option<usize>,
}

pub fn run_compare(args: CompareArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let offers: Vec<Offer> = match input::read_input(args.input.as_deref(), "offers")? {
        Some(offers) => offers,
        None => open_book(config)?.0.offers().to_vec(),
    };
    let window = args.window.unwrap_or(config.window_months);
    let result = analyze_offers(&offers, window)?;
    Ok(serde_json::to_value(result)?)
}
