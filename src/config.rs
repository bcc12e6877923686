//! Pricing configuration: fee rates, taxes and retroactive pricing parameters
//!
//! Every field has a default so a partial JSON file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn default_management_fee_rate() -> f64 { 0.10 }
fn default_instalment_fee() -> f64 { 5.0 }
fn default_legal_protection_premium() -> f64 { 100.0 }
fn default_legal_protection_tax_rate() -> f64 { 0.134 }
fn default_missing_balance_sheet_loading() -> f64 { 0.50 }

fn default_territory_tax_rates() -> HashMap<String, f64> {
    HashMap::from([
        ("FR".to_string(), 0.09),   // Metropolitan France
        ("DOM".to_string(), 0.045), // Overseas departments
    ])
}

fn default_prior_years() -> u32 { 5 }
fn default_antecedent_coefficient() -> f64 { 1.0 }
fn default_per_claim_loading() -> f64 { 0.10 }
fn default_loss_ratio_loading() -> f64 { 0.50 }
fn default_max_claims_factor() -> f64 { 3.0 }

/// Parameters of the retroactive coverage pricer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroactiveParams {
    /// Assumed duration of the prior coverage, in years
    #[serde(default = "default_prior_years")]
    pub prior_years: u32,

    /// Multiplier reflecting the prior record as a whole
    #[serde(default = "default_antecedent_coefficient")]
    pub antecedent_coefficient: f64,

    /// Loading per claim in a past year
    #[serde(default = "default_per_claim_loading")]
    pub per_claim_loading: f64,

    /// Loading per unit of loss ratio (claim cost / annual premium) in a past year
    #[serde(default = "default_loss_ratio_loading")]
    pub loss_ratio_loading: f64,

    /// Cap on the per-year claims factor
    #[serde(default = "default_max_claims_factor")]
    pub max_claims_factor: f64,
}

impl Default for RetroactiveParams {
    fn default() -> Self {
        Self {
            prior_years: default_prior_years(),
            antecedent_coefficient: default_antecedent_coefficient(),
            per_claim_loading: default_per_claim_loading(),
            loss_ratio_loading: default_loss_ratio_loading(),
            max_claims_factor: default_max_claims_factor(),
        }
    }
}

/// Externally configurable pricing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Management fee as a fraction of the gross premium
    #[serde(default = "default_management_fee_rate")]
    pub management_fee_rate: f64,

    /// Fee charged per instalment when the premium is split
    #[serde(default = "default_instalment_fee")]
    pub instalment_fee: f64,

    /// Flat annual legal-protection premium (before tax)
    #[serde(default = "default_legal_protection_premium")]
    pub legal_protection_premium: f64,

    /// Tax rate on the legal-protection premium
    #[serde(default = "default_legal_protection_tax_rate")]
    pub legal_protection_tax_rate: f64,

    /// Loading applied for a missing prior-year balance sheet
    #[serde(default = "default_missing_balance_sheet_loading")]
    pub missing_balance_sheet_loading: f64,

    /// Insurance tax rate by territory
    #[serde(default = "default_territory_tax_rates")]
    pub territory_tax_rates: HashMap<String, f64>,

    #[serde(default)]
    pub retroactive: RetroactiveParams,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            management_fee_rate: default_management_fee_rate(),
            instalment_fee: default_instalment_fee(),
            legal_protection_premium: default_legal_protection_premium(),
            legal_protection_tax_rate: default_legal_protection_tax_rate(),
            missing_balance_sheet_loading: default_missing_balance_sheet_loading(),
            territory_tax_rates: default_territory_tax_rates(),
            retroactive: RetroactiveParams::default(),
        }
    }
}

impl PricingConfig {
    /// Load configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insurance tax rate for a territory (case-insensitive)
    pub fn tax_rate(&self, territory: &str) -> Option<f64> {
        self.territory_tax_rates.get(territory).copied().or_else(|| {
            self.territory_tax_rates
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(territory))
                .map(|(_, &v)| v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.management_fee_rate, 0.10);
        assert_eq!(config.tax_rate("FR"), Some(0.09));
        assert_eq!(config.tax_rate("fr"), Some(0.09));
        assert_eq!(config.tax_rate("XX"), None);
        assert_eq!(config.retroactive.prior_years, 5);
        assert_eq!(config.retroactive.antecedent_coefficient, 1.0);
    }

    #[test]
    fn test_partial_json_override() {
        let config = PricingConfig::from_json_str(
            r#"{"management_fee_rate": 0.12, "retroactive": {"prior_years": 3}}"#,
        )
        .unwrap();

        assert_eq!(config.management_fee_rate, 0.12);
        assert_eq!(config.instalment_fee, 5.0);
        assert_eq!(config.retroactive.prior_years, 3);
        assert_eq!(config.retroactive.per_claim_loading, 0.10);
        assert_eq!(config.tax_rate("DOM"), Some(0.045));
    }
}
