//! Load risk declarations from JSON and past claims from CSV

use super::{PastClaim, RiskDeclaration};
use csv::Reader;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row matching past_claims.csv columns
#[derive(Debug, serde::Deserialize)]
struct ClaimRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "ClaimCount")]
    claim_count: u32,
    #[serde(rename = "TotalCost")]
    total_cost: f64,
}

/// Load a single declaration from a JSON file
pub fn load_declaration<P: AsRef<Path>>(path: P) -> Result<RiskDeclaration, Box<dyn Error>> {
    let file = File::open(path)?;
    let declaration = serde_json::from_reader(BufReader::new(file))?;
    Ok(declaration)
}

/// Load a JSON array of declarations from a file
pub fn load_declarations<P: AsRef<Path>>(path: P) -> Result<Vec<RiskDeclaration>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_declarations_from_reader(BufReader::new(file))
}

/// Load a JSON array of declarations from any reader
pub fn load_declarations_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<RiskDeclaration>, Box<dyn Error>> {
    let declarations = serde_json::from_reader(reader)?;
    Ok(declarations)
}

/// Load past claims from any CSV reader
pub fn load_past_claims_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PastClaim>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut claims = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ClaimRow = result?;
        claims.push(PastClaim {
            year: row.year,
            claim_count: row.claim_count,
            total_cost: row.total_cost,
        });
    }

    Ok(claims)
}

/// Load past claims from a CSV file
pub fn load_past_claims<P: AsRef<Path>>(path: P) -> Result<Vec<PastClaim>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_past_claims_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_past_claims() {
        let data = "Year,ClaimCount,TotalCost\n2021,1,4500.50\n2023,2,12000\n";
        let claims = load_past_claims_from_reader(data.as_bytes()).unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].year, 2021);
        assert_eq!(claims[1].claim_count, 2);
        assert!((claims[1].total_cost - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_declarations_array() {
        let data = r#"[
            {"declared_turnover": 80000, "workforce_fte": 1, "creation_date": "2010-01-01",
             "experience_years": 12, "activities": [{"code": 10, "share": 1.0}]},
            {"declared_turnover": 400000, "workforce_fte": 4, "creation_date": "2019-09-15",
             "experience_years": 4, "activities": [{"code": 1, "share": 70}, {"code": 3, "share": 30}],
             "frequency": "Quarterly", "effective_date": "2026-01-01"}
        ]"#;
        let decls = load_declarations_from_reader(data.as_bytes()).unwrap();

        assert_eq!(decls.len(), 2);
        assert_eq!(decls[1].activities.len(), 2);
        assert_eq!(decls[1].frequency.instalment_count(), 4);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(load_declarations_from_reader("{not json".as_bytes()).is_err());
    }
}
