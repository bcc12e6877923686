//! RCD Rating CLI
//!
//! Rates a single risk declaration and writes its payment schedule to CSV

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rcd_rating::{PricingConfig, QuoteRunner, ReferenceTables};
use rcd_rating::declaration::load_declaration;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rcd_rating", about = "Rate a decennial liability risk declaration")]
struct Args {
    /// Risk declaration (JSON)
    declaration: PathBuf,

    /// Pricing configuration (JSON); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of reference table CSVs; built-in tables when omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Rating date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output CSV for the payment schedule
    #[arg(long, default_value = "schedule_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let declaration = load_declaration(&args.declaration)
        .map_err(|e| anyhow!("Failed to load declaration {}: {}", args.declaration.display(), e))?;
    let config = match &args.config {
        Some(path) => PricingConfig::from_json_path(path)
            .map_err(|e| anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => PricingConfig::default(),
    };
    let tables = match &args.tables {
        Some(dir) => ReferenceTables::from_csv_path(dir)
            .map_err(|e| anyhow!("Failed to load tables from {}: {}", dir.display(), e))?,
        None => ReferenceTables::default_pricing(),
    };

    let runner = QuoteRunner::with_parts(tables, config);
    let as_of = args.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let result = runner
        .rate_as_of(&declaration, as_of)
        .context("Declaration rejected")?;

    println!("RCD Rating v0.1.0");
    println!("=================\n");

    match result.eligibility.reason {
        Some(reason) => println!("Eligibility: REFUSED ({})", reason),
        None => println!("Eligibility: accepted"),
    }
    println!("Rated turnover:      {:>12.2}", result.rated_turnover);
    println!();

    println!("{:>4} {:<42} {:>6} {:>8} {:>8} {:>12} {:>12}",
        "Code", "Activity", "Share", "Rate", "Applied", "At cap", "Beyond cap");
    println!("{}", "-".repeat(100));
    for line in &result.activity_lines {
        println!("{:>4} {:<42} {:>5.1}% {:>8.5} {:>8.5} {:>12.2} {:>12.2}",
            line.code,
            line.label,
            line.share * 100.0,
            line.base_rate,
            line.applied_rate,
            line.premium_at_cap,
            line.premium_beyond_cap,
        );
    }
    println!();

    println!("Majorations:");
    for m in result.majorations.items.iter().filter(|m| m.value != 0.0) {
        println!("  {:<28} {:>+7.2}%", m.rule.name(), m.value * 100.0);
    }
    println!("  Aggregate loading: {:.4}", result.loading());
    println!();

    let costs = &result.costs;
    println!("Base minimum premium: {:>12.2}", result.base_minimum_premium);
    println!("Marginal premium:     {:>12.2}", result.marginal_premium);
    println!("Gross premium:        {:>12.2}", costs.gross_premium);
    println!("Management fee:       {:>12.2}", costs.management_fee);
    println!("Splitting fee:        {:>12.2}", costs.splitting_fee);
    println!("Insurance tax:        {:>12.2}", costs.insurance_tax);
    println!("Legal protection TTC: {:>12.2}", costs.legal_protection_ttc());
    println!("Gross to pay:         {:>12.2}", costs.gross_to_pay);
    if costs.aggravation_premium > 0.0 {
        println!("Aggravation premium:  {:>12.2} (not included)", costs.aggravation_premium);
    }
    if let Some(retro) = &result.retroactive {
        println!("Retroactive cover:    {:>12.2} TTC ({} to {})",
            retro.total_ttc, retro.span_start, retro.effective_date);
    }
    println!();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Unable to create {}", args.output.display()))?;
    for instalment in &result.instalments {
        writer.serialize(instalment)?;
    }
    writer.flush()?;

    println!("{} instalments ({}) written to: {}",
        result.instalments.len(),
        result.frequency.as_str(),
        args.output.display());

    Ok(())
}
