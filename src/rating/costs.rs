//! Gross premium and ancillary costs

use crate::config::PricingConfig;
use serde::{Deserialize, Serialize};

/// Annual cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Premium before majorations (base minimum + marginal)
    pub premium_before_loading: f64,
    /// Aggregate majoration factor applied
    pub loading: f64,
    /// Premium after majorations
    pub gross_premium: f64,
    pub management_fee: f64,
    pub splitting_fee: f64,
    pub tax_rate: f64,
    /// Tax on gross premium and splitting fee
    pub insurance_tax: f64,
    pub legal_protection_ht: f64,
    pub legal_protection_tax: f64,
    /// Gross premium + management fee + tax + legal protection TTC + splitting fee
    pub gross_to_pay: f64,
    /// Separate surcharge for a missing balance sheet, not part of gross_to_pay
    pub aggravation_premium: f64,
}

impl CostBreakdown {
    pub fn legal_protection_ttc(&self) -> f64 {
        self.legal_protection_ht + self.legal_protection_tax
    }
}

/// Fee for splitting the premium into several instalments
pub fn splitting_fee(instalment_count: u32, per_instalment_fee: f64) -> f64 {
    if instalment_count > 1 {
        instalment_count as f64 * per_instalment_fee
    } else {
        0.0
    }
}

/// Aggregate the annual costs
pub fn aggregate(
    premium_before_loading: f64,
    loading: f64,
    aggravation_loading: f64,
    instalment_count: u32,
    tax_rate: f64,
    wants_legal_protection: bool,
    config: &PricingConfig,
) -> CostBreakdown {
    let gross_premium = premium_before_loading * loading;
    let management_fee = gross_premium * config.management_fee_rate;
    let splitting_fee = splitting_fee(instalment_count, config.instalment_fee);
    let insurance_tax = (gross_premium + splitting_fee) * tax_rate;

    let (legal_protection_ht, legal_protection_tax) = if wants_legal_protection {
        (
            config.legal_protection_premium,
            config.legal_protection_premium * config.legal_protection_tax_rate,
        )
    } else {
        (0.0, 0.0)
    };

    let gross_to_pay = gross_premium
        + management_fee
        + insurance_tax
        + legal_protection_ht
        + legal_protection_tax
        + splitting_fee;

    let aggravation_premium = if aggravation_loading > 0.0 {
        gross_premium * aggravation_loading * (1.0 + config.management_fee_rate + tax_rate)
    } else {
        0.0
    };

    CostBreakdown {
        premium_before_loading,
        loading,
        gross_premium,
        management_fee,
        splitting_fee,
        tax_rate,
        insurance_tax,
        legal_protection_ht,
        legal_protection_tax,
        gross_to_pay,
        aggravation_premium,
    }
}
