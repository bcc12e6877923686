//! Activity-weighted base premium
//!
//! Each declared activity contributes a premium on the first 70,000 of turnover
//! (always at the undiscounted base rate) and a marginal premium on the rest
//! (at the degressive rate once turnover exceeds 250,000), both weighted by the
//! activity's share of turnover.

use super::degressivity::{DegressivityTable, FLAT_REGIME_CEILING};
use crate::declaration::{as_fraction, ActivityShare};
use crate::error::RatingError;
use crate::tables::RateTable;
use serde::{Deserialize, Serialize};

/// Turnover covered by the base-tier premium
pub const PREMIUM_CAP_TURNOVER: f64 = 70_000.0;

/// Premium detail for one declared activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPremiumLine {
    pub code: u8,
    pub label: String,
    /// Share of turnover as a fraction
    pub share: f64,
    pub base_rate: f64,
    pub applied_rate: f64,
    pub degressivity: Option<f64>,
    pub d1: f64,
    pub d2: f64,
    pub premium_at_cap: f64,
    pub premium_beyond_cap: f64,
}

/// Activity premium totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPremiums {
    pub lines: Vec<ActivityPremiumLine>,
    /// Sum of premiums at cap
    pub base_minimum: f64,
    /// Sum of premiums beyond cap
    pub marginal: f64,
}

impl ActivityPremiums {
    /// Premium before majorations
    pub fn subtotal(&self) -> f64 {
        self.base_minimum + self.marginal
    }
}

/// Compute one line
fn premium_line(
    activity: &ActivityShare,
    rates: &RateTable,
    degressivity: &DegressivityTable,
    turnover: f64,
) -> Result<ActivityPremiumLine, RatingError> {
    let rate = rates
        .get(activity.code)
        .ok_or(RatingError::InvalidActivityCode(activity.code))?;
    let share = as_fraction(activity.share);
    let factor = degressivity.factor(activity.code);

    let applied_rate = match factor {
        Some(f) if turnover > FLAT_REGIME_CEILING => rate.base_rate * f,
        _ => rate.base_rate,
    };

    let premium_at_cap = rate.base_rate * PREMIUM_CAP_TURNOVER * share;
    let premium_beyond_cap = applied_rate * (turnover - PREMIUM_CAP_TURNOVER).max(0.0) * share;

    Ok(ActivityPremiumLine {
        code: rate.code,
        label: rate.label.clone(),
        share,
        base_rate: rate.base_rate,
        applied_rate,
        degressivity: factor,
        d1: rate.d1,
        d2: rate.d2,
        premium_at_cap,
        premium_beyond_cap,
    })
}

/// Compute premium lines for every declared activity
pub fn calculate(
    activities: &[ActivityShare],
    rates: &RateTable,
    degressivity: &DegressivityTable,
    turnover: f64,
) -> Result<ActivityPremiums, RatingError> {
    let lines = activities
        .iter()
        .map(|a| premium_line(a, rates, degressivity, turnover))
        .collect::<Result<Vec<_>, _>>()?;

    let base_minimum = lines.iter().map(|l| l.premium_at_cap).sum();
    let marginal = lines.iter().map(|l| l.premium_beyond_cap).sum();

    Ok(ActivityPremiums { lines, base_minimum, marginal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn premiums(activities: &[ActivityShare], turnover: f64) -> ActivityPremiums {
        let rates = RateTable::default_nomenclature();
        let degressivity = DegressivityTable::resolve(&rates, turnover);
        calculate(activities, &rates, &degressivity, turnover).unwrap()
    }

    #[test]
    fn test_turnover_at_cap_has_no_marginal() {
        let result = premiums(&[ActivityShare { code: 1, share: 1.0 }], 70_000.0);

        assert_eq!(result.marginal, 0.0);
        assert_relative_eq!(result.base_minimum, 0.0185 * 70_000.0, epsilon = 1e-9);
        // Flat regime: rate left undiscounted
        assert_eq!(result.lines[0].applied_rate, 0.0185);
    }

    #[test]
    fn test_degressive_rate_above_flat_regime() {
        let result = premiums(&[ActivityShare { code: 1, share: 100.0 }], 500_000.0);
        let line = &result.lines[0];

        assert_eq!(line.share, 1.0);
        assert_eq!(line.degressivity, Some(0.85));
        assert_relative_eq!(line.applied_rate, 0.0185 * 0.85, epsilon = 1e-12);
        // At-cap premium keeps the base rate
        assert_relative_eq!(line.premium_at_cap, 0.0185 * 70_000.0, epsilon = 1e-9);
        assert_relative_eq!(
            line.premium_beyond_cap,
            0.0185 * 0.85 * 430_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_flat_regime_ignores_factor() {
        let result = premiums(&[ActivityShare { code: 3, share: 1.0 }], 200_000.0);
        let line = &result.lines[0];

        assert_eq!(line.degressivity, Some(0.87));
        assert_eq!(line.applied_rate, line.base_rate);
    }

    #[test]
    fn test_share_weighting() {
        let result = premiums(
            &[
                ActivityShare { code: 1, share: 60.0 },
                ActivityShare { code: 10, share: 40.0 },
            ],
            150_000.0,
        );

        let expected_min = 0.0185 * 70_000.0 * 0.6 + 0.0070 * 70_000.0 * 0.4;
        let expected_marg = 0.0185 * 80_000.0 * 0.6 + 0.0070 * 80_000.0 * 0.4;
        assert_relative_eq!(result.base_minimum, expected_min, epsilon = 1e-9);
        assert_relative_eq!(result.marginal, expected_marg, epsilon = 1e-9);
        assert_relative_eq!(result.subtotal(), expected_min + expected_marg, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let rates = RateTable::default_nomenclature();
        let degressivity = DegressivityTable::resolve(&rates, 100_000.0);
        let err = calculate(&[ActivityShare { code: 42, share: 1.0 }], &rates, &degressivity, 100_000.0);
        assert_eq!(err, Err(RatingError::InvalidActivityCode(42)));
    }
}
