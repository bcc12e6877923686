//! Rating pipeline: eligibility, turnover, degressivity, activity premiums,
//! majorations, costs, retroactive cover and payment schedule

use super::activity::{self, ActivityPremiumLine};
use super::costs::{self, CostBreakdown};
use super::degressivity::{rated_turnover, DegressivityTable};
use super::eligibility::{assess_declaration, Eligibility};
use super::majoration::{CompanyProfile, MajorationSet};
use crate::config::PricingConfig;
use crate::declaration::{InstalmentFrequency, RiskDeclaration};
use crate::error::RatingError;
use crate::retroactive::{self, RetroactiveCoverageResult, RetroactiveRequest};
use crate::schedule::{self, Instalment, ScheduleTotals};
use crate::tables::ReferenceTables;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tolerance when checking that activity shares do not exceed 100%
const SHARE_TOLERANCE: f64 = 1e-9;

/// Largest rated turnover accepted; keeps every amount well inside cent precision
pub const MAX_RATED_TURNOVER: f64 = 1e12;

/// Complete output of one rating call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    /// Date the company age was measured at
    pub as_of: NaiveDate,
    pub effective_date: NaiveDate,
    pub frequency: InstalmentFrequency,
    pub rated_turnover: f64,
    pub eligibility: Eligibility,
    pub degressivity: DegressivityTable,
    pub activity_lines: Vec<ActivityPremiumLine>,
    pub base_minimum_premium: f64,
    pub marginal_premium: f64,
    pub majorations: MajorationSet,
    pub costs: CostBreakdown,
    pub instalments: Vec<Instalment>,
    pub retroactive: Option<RetroactiveCoverageResult>,
}

impl RatingResult {
    pub fn is_refused(&self) -> bool {
        self.eligibility.refused
    }

    /// Aggregate majoration factor
    pub fn loading(&self) -> f64 {
        self.costs.loading
    }

    pub fn gross_premium(&self) -> f64 {
        self.costs.gross_premium
    }

    pub fn gross_to_pay(&self) -> f64 {
        self.costs.gross_to_pay
    }

    /// Annual amount due including retroactive cover
    pub fn total_payable(&self) -> f64 {
        self.costs.gross_to_pay + self.retroactive.as_ref().map_or(0.0, |r| r.total_ttc)
    }
}

/// Rating engine borrowing shared reference tables and configuration
#[derive(Debug, Clone, Copy)]
pub struct RatingEngine<'a> {
    tables: &'a ReferenceTables,
    config: &'a PricingConfig,
}

impl<'a> RatingEngine<'a> {
    pub fn new(tables: &'a ReferenceTables, config: &'a PricingConfig) -> Self {
        Self { tables, config }
    }

    pub fn tables(&self) -> &ReferenceTables {
        self.tables
    }

    pub fn config(&self) -> &PricingConfig {
        self.config
    }

    /// Check the declaration honours the input contract
    pub fn validate(&self, declaration: &RiskDeclaration) -> Result<f64, RatingError> {
        if !declaration.declared_turnover.is_finite() || declaration.declared_turnover < 0.0 {
            return Err(RatingError::InvalidTurnover(declaration.declared_turnover));
        }
        if !declaration.workforce_fte.is_finite() || declaration.workforce_fte <= 0.0 {
            return Err(RatingError::InvalidWorkforce(declaration.workforce_fte));
        }
        let turnover = rated_turnover(declaration.workforce_fte, declaration.declared_turnover);
        if turnover > MAX_RATED_TURNOVER {
            return Err(RatingError::TurnoverTooLarge(turnover));
        }
        if declaration.activities.is_empty() {
            return Err(RatingError::NoActivities);
        }
        for activity in &declaration.activities {
            if !self.tables.rates.contains(activity.code) {
                return Err(RatingError::InvalidActivityCode(activity.code));
            }
            if !activity.share.is_finite() || activity.share < 0.0 {
                return Err(RatingError::InvalidShare {
                    code: activity.code,
                    share: activity.share,
                });
            }
        }

        let total_share = declaration.total_share();
        if total_share > 1.0 + SHARE_TOLERANCE {
            log::warn!("Activity shares sum to {:.2}% of turnover", total_share * 100.0);
        }

        self.config
            .tax_rate(&declaration.territory)
            .ok_or_else(|| RatingError::UnknownTerritory(declaration.territory.clone()))
    }

    /// Whether retroactive cover must be priced for this declaration
    pub fn retroactive_applies(&self, declaration: &RiskDeclaration) -> bool {
        let known_default = declaration.prior_insurer_defaulted
            || declaration
                .prior_insurer
                .as_deref()
                .is_some_and(|name| self.tables.defaulting_insurers.contains(name));

        known_default && declaration.effective_date.is_some() && declaration.wants_retroactive_cover
    }

    /// Rate a declaration as of today
    pub fn rate(&self, declaration: &RiskDeclaration) -> Result<RatingResult, RatingError> {
        self.rate_as_of(declaration, chrono::Local::now().date_naive())
    }

    /// Rate a declaration, measuring company age at `as_of`
    pub fn rate_as_of(
        &self,
        declaration: &RiskDeclaration,
        as_of: NaiveDate,
    ) -> Result<RatingResult, RatingError> {
        let tax_rate = self.validate(declaration)?;
        let declaration = declaration.normalized();

        let eligibility = assess_declaration(&declaration);
        if let Some(reason) = eligibility.reason {
            log::warn!("Risk refused ({}): {}", reason.code(), reason);
        }

        let turnover = rated_turnover(declaration.workforce_fte, declaration.declared_turnover);
        let degressivity = DegressivityTable::resolve(&self.tables.rates, turnover);
        let premiums = activity::calculate(&declaration.activities, &self.tables.rates, &degressivity, turnover)?;
        log::debug!(
            "Rated turnover {:.2}, base minimum {:.2}, marginal {:.2}",
            turnover,
            premiums.base_minimum,
            premiums.marginal
        );

        let profile = CompanyProfile::from_declaration(
            &declaration,
            as_of,
            self.config.missing_balance_sheet_loading,
        );
        let majorations = MajorationSet::evaluate(&profile);

        let instalment_count = declaration.frequency.instalment_count();
        let costs = costs::aggregate(
            premiums.subtotal(),
            majorations.aggregate(),
            majorations.aggravation_loading(),
            instalment_count,
            tax_rate,
            declaration.wants_legal_protection,
            self.config,
        );

        let effective_date = declaration.effective_date.unwrap_or(as_of);
        let retroactive = if self.retroactive_applies(&declaration) {
            self.price_retroactive(&declaration, premiums.subtotal(), effective_date, tax_rate)
        } else {
            None
        };

        let totals = ScheduleTotals {
            base_premium: costs.gross_premium,
            management_fee: costs.management_fee,
            splitting_fee: costs.splitting_fee,
            insurance_tax: costs.insurance_tax,
            legal_protection_ht: costs.legal_protection_ht,
            legal_protection_tax: costs.legal_protection_tax,
            retroactive_ht: retroactive.as_ref().map_or(0.0, |r| r.premium_ht + r.management_fee),
            retroactive_tax: retroactive.as_ref().map_or(0.0, |r| r.tax),
        };
        let instalments = schedule::generate(&totals, effective_date, declaration.frequency);

        Ok(RatingResult {
            as_of,
            effective_date,
            frequency: declaration.frequency,
            rated_turnover: turnover,
            eligibility,
            degressivity,
            activity_lines: premiums.lines,
            base_minimum_premium: premiums.base_minimum,
            marginal_premium: premiums.marginal,
            majorations,
            costs,
            instalments,
            retroactive,
        })
    }

    /// Price retroactive cover; failures are logged and dropped
    fn price_retroactive(
        &self,
        declaration: &RiskDeclaration,
        annual_premium: f64,
        effective_date: NaiveDate,
        tax_rate: f64,
    ) -> Option<RetroactiveCoverageResult> {
        let request = RetroactiveRequest {
            annual_premium,
            prior_coverage_end: declaration.prior_coverage_end.unwrap_or(effective_date),
            effective_date,
            past_claims: &declaration.past_claims,
            management_fee_rate: self.config.management_fee_rate,
            tax_rate,
        };

        match retroactive::price(&request, &self.tables.amortization, &self.config.retroactive) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Retroactive cover not priced: {}", e);
                None
            }
        }
    }
}
