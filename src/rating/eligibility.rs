//! Eligibility screening of a risk declaration
//!
//! A refusal does not stop rating: the price is still computed and the verdict
//! travels with it on the result.

use crate::declaration::{as_fraction, InactivityPeriod, RiskDeclaration};
use serde::{Deserialize, Serialize};

/// Maximum share of turnover subcontracted or from resale
pub const MAX_OUTSOURCED_SHARE: f64 = 0.15;

/// Minimum operator experience in years
pub const MIN_EXPERIENCE_YEARS: f64 = 1.0;

/// Reason for refusing a risk, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefusalReason {
    InsufficientExperience,
    ProlongedInactivity,
    ExcessSubcontracting,
    ExcessResale,
}

impl RefusalReason {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            RefusalReason::InsufficientExperience => "INSUFFICIENT_EXPERIENCE",
            RefusalReason::ProlongedInactivity => "PROLONGED_INACTIVITY",
            RefusalReason::ExcessSubcontracting => "EXCESS_SUBCONTRACTING",
            RefusalReason::ExcessResale => "EXCESS_RESALE",
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            RefusalReason::InsufficientExperience => "insufficient experience (less than 1 year)",
            RefusalReason::ProlongedInactivity => "prolonged inactivity (more than 12 months without coverage)",
            RefusalReason::ExcessSubcontracting => "excess subcontracting (more than 15% of turnover)",
            RefusalReason::ExcessResale => "excess resale of materials (more than 15% of turnover)",
        }
    }
}

impl std::fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Eligibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub refused: bool,
    pub reason: Option<RefusalReason>,
}

impl Eligibility {
    pub fn accepted() -> Self {
        Self { refused: false, reason: None }
    }
}

/// Evaluate the four refusal predicates; the first matching reason wins
pub fn assess(
    experience_years: f64,
    inactivity: InactivityPeriod,
    subcontracted_share: f64,
    resale_share: f64,
) -> Eligibility {
    let checks = [
        (experience_years < MIN_EXPERIENCE_YEARS, RefusalReason::InsufficientExperience),
        (inactivity == InactivityPeriod::OverTwelveMonths, RefusalReason::ProlongedInactivity),
        (as_fraction(subcontracted_share) > MAX_OUTSOURCED_SHARE, RefusalReason::ExcessSubcontracting),
        (as_fraction(resale_share) > MAX_OUTSOURCED_SHARE, RefusalReason::ExcessResale),
    ];

    match checks.iter().find(|(failed, _)| *failed) {
        Some(&(_, reason)) => Eligibility { refused: true, reason: Some(reason) },
        None => Eligibility::accepted(),
    }
}

/// Evaluate eligibility for a whole declaration
pub fn assess_declaration(declaration: &RiskDeclaration) -> Eligibility {
    assess(
        declaration.experience_years,
        declaration.inactivity,
        declaration.subcontracted_share,
        declaration.resale_share,
    )
}
