//! Error types for the rating engine
//!
//! Eligibility refusal is not an error: it is reported on the rating result.
//! `RatingError` covers malformed declarations rejected at the boundary, and
//! `RetroactiveError` covers failures of the retroactive pricer, which the
//! engine catches and never propagates.

use thiserror::Error;

/// Contract violations detected while validating a risk declaration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    #[error("Activity code {0} is outside the rate table (expected 1-20)")]
    InvalidActivityCode(u8),

    #[error("Declared turnover must be a finite, non-negative amount (got {0})")]
    InvalidTurnover(f64),

    #[error("Rated turnover {0} exceeds the supported maximum")]
    TurnoverTooLarge(f64),

    #[error("Workforce must be strictly positive (got {0} FTE)")]
    InvalidWorkforce(f64),

    #[error("At least one activity must be declared")]
    NoActivities,

    #[error("Share of turnover for activity {code} must be finite and non-negative (got {share})")]
    InvalidShare { code: u8, share: f64 },

    #[error("No insurance tax rate configured for territory '{0}'")]
    UnknownTerritory(String),
}

/// Failures of the retroactive coverage pricer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetroactiveError {
    #[error("Amortization table is empty")]
    EmptyAmortizationTable,

    #[error("Amortization factor at half-year {index} is invalid: {value}")]
    InvalidAmortizationFactor { index: usize, value: f64 },

    #[error("Amortization table increases at half-year {0}")]
    NonMonotonicAmortization(usize),

    #[error("Prior coverage ended on {prior_end}, after the effective date {effective}")]
    PriorCoverageAfterEffective {
        prior_end: chrono::NaiveDate,
        effective: chrono::NaiveDate,
    },

    #[error("Assumed prior coverage duration must be at least one year")]
    ZeroPriorDuration,

    #[error("Past claim for {year} has invalid data (count {count}, cost {cost})")]
    InvalidClaim { year: i32, count: u32, cost: f64 },

    #[error("Annual premium basis must be finite and non-negative (got {0})")]
    InvalidPremium(f64),

    #[error("Antecedent coefficient must be finite and positive (got {0})")]
    InvalidCoefficient(f64),
}
