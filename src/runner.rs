//! Quote runner for efficient batch rating
//!
//! Loads reference tables and configuration once, then rates any number of
//! declarations against them, in parallel for batches.

use crate::config::PricingConfig;
use crate::declaration::RiskDeclaration;
use crate::error::RatingError;
use crate::rating::{RatingEngine, RatingResult};
use crate::tables::ReferenceTables;
use chrono::NaiveDate;
use rayon::prelude::*;

/// Pre-loaded runner sharing tables and configuration across rating calls
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_csv()?;
/// let results = runner.rate_batch_as_of(&declarations, today);
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    tables: ReferenceTables,
    config: PricingConfig,
}

impl QuoteRunner {
    /// Create runner with built-in tables and default configuration
    pub fn new() -> Self {
        Self {
            tables: ReferenceTables::default_pricing(),
            config: PricingConfig::default(),
        }
    }

    /// Create runner by loading tables from the default CSV directory
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            tables: ReferenceTables::from_csv()?,
            config: PricingConfig::default(),
        })
    }

    /// Create runner with pre-built tables and configuration
    pub fn with_parts(tables: ReferenceTables, config: PricingConfig) -> Self {
        Self { tables, config }
    }

    /// Engine borrowing this runner's reference data
    pub fn engine(&self) -> RatingEngine<'_> {
        RatingEngine::new(&self.tables, &self.config)
    }

    /// Rate one declaration as of a given date
    pub fn rate_as_of(
        &self,
        declaration: &RiskDeclaration,
        as_of: NaiveDate,
    ) -> Result<RatingResult, RatingError> {
        self.engine().rate_as_of(declaration, as_of)
    }

    /// Rate many declarations in parallel; each result is independent
    pub fn rate_batch_as_of(
        &self,
        declarations: &[RiskDeclaration],
        as_of: NaiveDate,
    ) -> Vec<Result<RatingResult, RatingError>> {
        let engine = self.engine();
        let results: Vec<_> = declarations
            .par_iter()
            .map(|d| engine.rate_as_of(d, as_of))
            .collect();

        let refused = results
            .iter()
            .filter(|r| matches!(r, Ok(res) if res.is_refused()))
            .count();
        let invalid = results.iter().filter(|r| r.is_err()).count();
        log::info!(
            "Rated {} declarations ({} refused, {} invalid)",
            results.len(),
            refused,
            invalid
        );

        results
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Get mutable reference to configuration for customization
    pub fn config_mut(&mut self) -> &mut PricingConfig {
        &mut self.config
    }
}

impl Default for QuoteRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ActivityShare;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_batch_matches_single() {
        let runner = QuoteRunner::new();
        let declarations: Vec<_> = [100_000.0, 400_000.0, 800_000.0]
            .iter()
            .map(|&turnover| {
                RiskDeclaration::new(
                    turnover,
                    1.0,
                    date(2012, 5, 1),
                    12.0,
                    vec![ActivityShare { code: 2, share: 1.0 }],
                )
            })
            .collect();

        let as_of = date(2026, 1, 1);
        let batch = runner.rate_batch_as_of(&declarations, as_of);
        assert_eq!(batch.len(), 3);

        for (decl, result) in declarations.iter().zip(&batch) {
            let single = runner.rate_as_of(decl, as_of).unwrap();
            assert_eq!(result.as_ref().unwrap(), &single);
        }

        // Higher turnover pays more
        let premiums: Vec<f64> = batch.iter().map(|r| r.as_ref().unwrap().gross_premium()).collect();
        assert!(premiums[0] < premiums[1] && premiums[1] < premiums[2]);
    }

    #[test]
    fn test_invalid_declaration_isolated() {
        let runner = QuoteRunner::new();
        let good = RiskDeclaration::new(
            100_000.0,
            1.0,
            date(2012, 5, 1),
            12.0,
            vec![ActivityShare { code: 2, share: 1.0 }],
        );
        let mut bad = good.clone();
        bad.activities[0].code = 99;

        let results = runner.rate_batch_as_of(&[good, bad], date(2026, 1, 1));
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(RatingError::InvalidActivityCode(99)));
    }
}
