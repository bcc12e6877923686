//! CSV-based reference table loader
//!
//! Loads the rating reference tables from CSV files in data/tables/

use super::rates::ActivityRate;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to reference tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

/// Raw CSV row matching activity_rates.csv columns
#[derive(Debug, serde::Deserialize)]
struct RateRow {
    #[serde(rename = "Code")]
    code: u8,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "BaseRate")]
    base_rate: f64,
    #[serde(rename = "D1")]
    d1: f64,
    #[serde(rename = "D2")]
    d2: f64,
}

/// Load activity rates from a reader
pub fn read_activity_rates<R: Read>(reader: R) -> Result<Vec<ActivityRate>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rates = Vec::new();

    for result in reader.deserialize() {
        let row: RateRow = result?;
        if row.code == 0 || row.code as usize > super::rates::ACTIVITY_COUNT {
            return Err(format!("Activity code out of range: {}", row.code).into());
        }
        rates.push(ActivityRate {
            code: row.code,
            label: row.label,
            base_rate: row.base_rate,
            d1: row.d1,
            d2: row.d2,
        });
    }

    Ok(rates)
}

/// Load amortization factors from a reader
/// Returns Vec<f64> indexed by elapsed half-year (0-indexed in file)
pub fn read_amortization<R: Read>(reader: R) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut factors = Vec::new();

    for result in reader.records() {
        let record = result?;
        let half_year: usize = record[0].parse()?;
        let factor: f64 = record[1].parse()?;

        if half_year != factors.len() {
            return Err(format!("Amortization rows must be contiguous, found half-year {}", half_year).into());
        }
        factors.push(factor);
    }

    Ok(factors)
}

/// Load defaulting insurer names from a reader (one name per row)
pub fn read_defaulting_insurers<R: Read>(reader: R) -> Result<Vec<String>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut names = Vec::new();

    for result in reader.records() {
        let record = result?;
        names.push(record[0].to_string());
    }

    Ok(names)
}

/// All reference tables loaded from the given directory
pub struct LoadedTables {
    pub activity_rates: Vec<ActivityRate>,
    pub amortization: Vec<f64>,
    pub defaulting_insurers: Vec<String>,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            activity_rates: read_activity_rates(File::open(path.join("activity_rates.csv"))?)?,
            amortization: read_amortization(File::open(path.join("amortization.csv"))?)?,
            defaulting_insurers: read_defaulting_insurers(File::open(
                path.join("defaulting_insurers.csv"),
            )?)?,
        })
    }
}
