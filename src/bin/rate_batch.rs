//! Rate a batch of risk declarations in parallel
//!
//! Outputs one CSV row per instalment for every accepted or refused quote

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Parser;
use rcd_rating::declaration::load_declarations;
use rcd_rating::QuoteRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "rate_batch", about = "Rate a JSON array of risk declarations")]
struct Args {
    /// Declarations (JSON array)
    input: PathBuf,

    /// Rating date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[arg(long, default_value = "batch_schedule_output.csv")]
    output: PathBuf,
}

/// Instalment row flattened with its quote index
#[derive(Debug, Serialize)]
struct BatchRow {
    quote: usize,
    refused: bool,
    reason: String,
    instalment: u32,
    due_date: NaiveDate,
    period_start: NaiveDate,
    period_end: NaiveDate,
    amount_ht: f64,
    tax: f64,
    amount_ttc: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let declarations = load_declarations(&args.input)
        .map_err(|e| anyhow!("Failed to load {}: {}", args.input.display(), e))?;
    println!("Loaded {} declarations in {:?}", declarations.len(), start.elapsed());

    let runner = QuoteRunner::new();
    let as_of = args.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    let rate_start = Instant::now();
    let results = runner.rate_batch_as_of(&declarations, as_of);
    println!("Rating complete in {:?}", rate_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)?;
    let mut total_payable = 0.0;
    let mut rejected = 0;

    for (quote, result) in results.iter().enumerate() {
        let result = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Quote {}: {}", quote, e);
                rejected += 1;
                continue;
            }
        };
        total_payable += result.total_payable();

        let reason = result
            .eligibility
            .reason
            .map(|r| r.code().to_string())
            .unwrap_or_default();

        for instalment in &result.instalments {
            writer.serialize(BatchRow {
                quote,
                refused: result.is_refused(),
                reason: reason.clone(),
                instalment: instalment.index,
                due_date: instalment.due_date,
                period_start: instalment.period_start,
                period_end: instalment.period_end,
                amount_ht: instalment.amount_ht,
                tax: instalment.tax,
                amount_ttc: instalment.amount_ttc,
            })?;
        }
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Quotes:         {}", results.len());
    println!("  Rejected:       {}", rejected);
    println!("  Total payable:  {:.2}", total_payable);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
