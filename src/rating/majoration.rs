//! Risk surcharges and discounts ("majorations")
//!
//! Nine independent rules each return a signed loading (+0.10 = +10%). All rules
//! except the missing balance sheet are summed into one aggregate factor
//! `1 + sum`; the missing balance sheet loading is priced separately as an
//! aggravation premium.

use crate::declaration::{ClaimsHistory, RiskDeclaration};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies a majoration rule, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MajorationRule {
    WorkforceActivityMix,
    QualifiedTradesperson,
    CompanyAge,
    OperatorExperience,
    PriorInsurerDefaulted,
    ContinuousCoverage,
    MissingBalanceSheet,
    InactiveWithoutClosure,
    NoClaimsHistory,
}

impl MajorationRule {
    pub const ALL: [MajorationRule; 9] = [
        MajorationRule::WorkforceActivityMix,
        MajorationRule::QualifiedTradesperson,
        MajorationRule::CompanyAge,
        MajorationRule::OperatorExperience,
        MajorationRule::PriorInsurerDefaulted,
        MajorationRule::ContinuousCoverage,
        MajorationRule::MissingBalanceSheet,
        MajorationRule::InactiveWithoutClosure,
        MajorationRule::NoClaimsHistory,
    ];

    /// Whether the rule contributes to the aggregate loading
    pub fn in_aggregate(&self) -> bool {
        !matches!(self, MajorationRule::MissingBalanceSheet)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MajorationRule::WorkforceActivityMix => "workforce_activity_mix",
            MajorationRule::QualifiedTradesperson => "qualified_tradesperson",
            MajorationRule::CompanyAge => "company_age",
            MajorationRule::OperatorExperience => "operator_experience",
            MajorationRule::PriorInsurerDefaulted => "prior_insurer_defaulted",
            MajorationRule::ContinuousCoverage => "continuous_coverage",
            MajorationRule::MissingBalanceSheet => "missing_balance_sheet",
            MajorationRule::InactiveWithoutClosure => "inactive_without_closure",
            MajorationRule::NoClaimsHistory => "no_claims_history",
        }
    }

    /// Evaluate the rule against the company profile
    pub fn evaluate(&self, profile: &CompanyProfile) -> f64 {
        match self {
            MajorationRule::WorkforceActivityMix => {
                let fte = profile.workforce_fte;
                let count = profile.activity_count;
                if fte <= 1.0 && (4..=5).contains(&count) {
                    0.10
                } else if fte > 1.0 && fte < 5.0 && (6..=8).contains(&count) {
                    0.10
                } else {
                    0.0
                }
            }
            MajorationRule::QualifiedTradesperson => {
                if profile.is_qualified_tradesperson { -0.05 } else { 0.0 }
            }
            MajorationRule::CompanyAge => {
                if profile.company_age_years < 1.0 {
                    0.20
                } else if profile.company_age_years < 3.0 {
                    0.10
                } else {
                    0.0
                }
            }
            MajorationRule::OperatorExperience => {
                let years = profile.experience_years;
                if years < 1.0 {
                    // Refused by eligibility
                    0.0
                } else if years < 3.0 {
                    0.05
                } else if years < 5.0 {
                    0.0
                } else {
                    -0.05
                }
            }
            MajorationRule::PriorInsurerDefaulted => {
                if profile.prior_insurer_defaulted
                    && !profile.is_new_company
                    && profile.claims_history != ClaimsHistory::InsurerDefaulted
                {
                    0.20
                } else {
                    0.0
                }
            }
            MajorationRule::ContinuousCoverage => {
                if profile.is_new_company || profile.prior_insurer_defaulted {
                    0.0
                } else if profile.continuous_coverage_years <= 1.0 {
                    0.10
                } else if profile.continuous_coverage_years <= 2.0 {
                    0.05
                } else {
                    0.0
                }
            }
            MajorationRule::MissingBalanceSheet => {
                if profile.missing_balance_sheet && !profile.is_new_company {
                    profile.missing_balance_sheet_loading
                } else {
                    0.0
                }
            }
            MajorationRule::InactiveWithoutClosure => {
                if profile.inactive_without_closure { 0.20 } else { 0.0 }
            }
            MajorationRule::NoClaimsHistory => {
                // Second acknowledgement of a defaulted insurer, kept independent of rule 5
                if profile.claims_history == ClaimsHistory::InsurerDefaulted { 0.20 } else { 0.0 }
            }
        }
    }
}

/// Facts the majoration rules read
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyProfile {
    pub workforce_fte: f64,
    pub activity_count: usize,
    pub is_qualified_tradesperson: bool,
    pub company_age_years: f64,
    pub experience_years: f64,
    pub prior_insurer_defaulted: bool,
    pub is_new_company: bool,
    pub claims_history: ClaimsHistory,
    pub continuous_coverage_years: f64,
    pub missing_balance_sheet: bool,
    pub missing_balance_sheet_loading: f64,
    pub inactive_without_closure: bool,
}

impl CompanyProfile {
    pub fn from_declaration(
        declaration: &RiskDeclaration,
        as_of: NaiveDate,
        missing_balance_sheet_loading: f64,
    ) -> Self {
        Self {
            workforce_fte: declaration.workforce_fte,
            activity_count: declaration.activity_count(),
            is_qualified_tradesperson: declaration.is_qualified_tradesperson,
            company_age_years: declaration.company_age_years(as_of),
            experience_years: declaration.experience_years,
            prior_insurer_defaulted: declaration.prior_insurer_defaulted,
            is_new_company: declaration.is_new_company,
            claims_history: declaration.claims_history,
            continuous_coverage_years: declaration.continuous_coverage_years,
            missing_balance_sheet: declaration.missing_balance_sheet,
            missing_balance_sheet_loading,
            inactive_without_closure: declaration.inactive_without_closure,
        }
    }
}

/// Value produced by one rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Majoration {
    pub rule: MajorationRule,
    pub value: f64,
}

/// Every rule's value for one rating call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorationSet {
    pub items: Vec<Majoration>,
}

impl MajorationSet {
    /// Evaluate every rule in order
    pub fn evaluate(profile: &CompanyProfile) -> Self {
        let items = MajorationRule::ALL
            .iter()
            .map(|&rule| Majoration { rule, value: rule.evaluate(profile) })
            .collect();
        Self { items }
    }

    pub fn get(&self, rule: MajorationRule) -> f64 {
        self.items
            .iter()
            .find(|m| m.rule == rule)
            .map(|m| m.value)
            .unwrap_or(0.0)
    }

    /// Aggregate loading: 1 + sum of every rule in the aggregate
    pub fn aggregate(&self) -> f64 {
        self.items
            .iter()
            .filter(|m| m.rule.in_aggregate())
            .fold(1.0, |acc, m| acc + m.value)
    }

    /// Loading driving the separate aggravation premium
    pub fn aggravation_loading(&self) -> f64 {
        self.get(MajorationRule::MissingBalanceSheet)
    }
}
