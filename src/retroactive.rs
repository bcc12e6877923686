//! Retroactive coverage pricing ("reprise du passé")
//!
//! Prices the liability inherited from a defaulting or lapsed prior insurer.
//! The backdated span does not start at the lapse date: it covers the assumed
//! duration of the prior coverage (`prior_years` before `prior_end`) plus the gap
//! from `prior_end` to the effective date. With no gap the premium still covers
//! the full `prior_years`; each day of gap adds to it.
//!
//! The span is cut into half-year slices counted back from the effective date. Each
//! slice is charged half the annual premium, scaled by the portion of the slice
//! inside the span, the amortization factor for its age, the claims factor of
//! its year and the antecedent coefficient.

use crate::config::RetroactiveParams;
use crate::declaration::PastClaim;
use crate::error::RetroactiveError;
use crate::tables::AmortizationTable;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Contribution of one half-year slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroactivePeriodLine {
    /// Elapsed half-years before the effective date (0 = most recent)
    pub half_year: usize,
    pub period_start: NaiveDate,
    /// Last covered day (inclusive)
    pub period_end: NaiveDate,
    /// Portion of the half-year inside the span
    pub weight: f64,
    pub amortization_factor: f64,
    pub claims_factor: f64,
    pub premium: f64,
}

/// Priced retroactive coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroactiveCoverageResult {
    pub span_start: NaiveDate,
    pub prior_coverage_end: NaiveDate,
    pub effective_date: NaiveDate,
    /// Days without coverage between prior end and effective date
    pub gap_days: i64,
    pub lines: Vec<RetroactivePeriodLine>,
    pub premium_ht: f64,
    pub management_fee: f64,
    pub tax: f64,
    pub total_ttc: f64,
}

/// Inputs of one retroactive pricing
#[derive(Debug, Clone)]
pub struct RetroactiveRequest<'a> {
    /// Annual premium before majorations
    pub annual_premium: f64,
    pub prior_coverage_end: NaiveDate,
    pub effective_date: NaiveDate,
    pub past_claims: &'a [PastClaim],
    pub management_fee_rate: f64,
    pub tax_rate: f64,
}

/// Loading for the claims recorded in one calendar year
pub fn claims_factor(
    year: i32,
    claims: &[PastClaim],
    annual_premium: f64,
    params: &RetroactiveParams,
) -> f64 {
    let (count, cost) = claims
        .iter()
        .filter(|c| c.year == year)
        .fold((0u32, 0.0), |(n, total), c| (n + c.claim_count, total + c.total_cost));

    if count == 0 && cost == 0.0 {
        return 1.0;
    }

    let loss_ratio = if annual_premium > 0.0 { cost / annual_premium } else { 0.0 };
    let factor = 1.0 + params.per_claim_loading * count as f64 + params.loss_ratio_loading * loss_ratio;
    factor.min(params.max_claims_factor)
}

fn validate(
    request: &RetroactiveRequest<'_>,
    table: &AmortizationTable,
    params: &RetroactiveParams,
) -> Result<(), RetroactiveError> {
    table.validate()?;

    if !request.annual_premium.is_finite() || request.annual_premium < 0.0 {
        return Err(RetroactiveError::InvalidPremium(request.annual_premium));
    }
    if params.prior_years == 0 {
        return Err(RetroactiveError::ZeroPriorDuration);
    }
    if !params.antecedent_coefficient.is_finite() || params.antecedent_coefficient <= 0.0 {
        return Err(RetroactiveError::InvalidCoefficient(params.antecedent_coefficient));
    }
    if request.prior_coverage_end > request.effective_date {
        return Err(RetroactiveError::PriorCoverageAfterEffective {
            prior_end: request.prior_coverage_end,
            effective: request.effective_date,
        });
    }
    if let Some(bad) = request
        .past_claims
        .iter()
        .find(|c| !c.total_cost.is_finite() || c.total_cost < 0.0)
    {
        return Err(RetroactiveError::InvalidClaim {
            year: bad.year,
            count: bad.claim_count,
            cost: bad.total_cost,
        });
    }
    Ok(())
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}

/// Price the retroactive coverage
pub fn price(
    request: &RetroactiveRequest<'_>,
    table: &AmortizationTable,
    params: &RetroactiveParams,
) -> Result<RetroactiveCoverageResult, RetroactiveError> {
    validate(request, table, params)?;

    let effective = request.effective_date;
    let span_start = months_before(request.prior_coverage_end, 12 * params.prior_years);
    let half_year_premium = request.annual_premium / 2.0;

    let mut lines = Vec::new();
    let mut half_year = 0usize;
    loop {
        let slice_end = months_before(effective, 6 * half_year as u32);
        if slice_end <= span_start {
            break;
        }
        let full_start = months_before(effective, 6 * (half_year as u32 + 1));
        let slice_start = full_start.max(span_start);

        let full_days = (slice_end - full_start).num_days().max(1) as f64;
        let weight = (slice_end - slice_start).num_days() as f64 / full_days;
        let amortization_factor = table.factor(half_year);
        let claims = claims_factor(slice_start.year(), request.past_claims, request.annual_premium, params);
        let premium = half_year_premium * weight * amortization_factor * claims * params.antecedent_coefficient;

        lines.push(RetroactivePeriodLine {
            half_year,
            period_start: slice_start,
            period_end: slice_end.pred_opt().unwrap_or(slice_start),
            weight,
            amortization_factor,
            claims_factor: claims,
            premium,
        });
        half_year += 1;
    }

    let premium_ht: f64 = lines.iter().map(|l| l.premium).sum();
    if !premium_ht.is_finite() {
        return Err(RetroactiveError::InvalidPremium(premium_ht));
    }
    let management_fee = premium_ht * request.management_fee_rate;
    let tax = premium_ht * request.tax_rate;

    log::debug!(
        "Retroactive cover from {} to {}: {} half-years, premium HT {:.2}",
        span_start,
        effective,
        lines.len(),
        premium_ht
    );

    Ok(RetroactiveCoverageResult {
        span_start,
        prior_coverage_end: request.prior_coverage_end,
        effective_date: effective,
        gap_days: (effective - request.prior_coverage_end).num_days(),
        lines,
        premium_ht,
        management_fee,
        tax,
        total_ttc: premium_ht + management_fee + tax,
    })
}
