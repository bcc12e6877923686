//! Rated turnover and turnover-based degressivity
//!
//! The rated turnover is floored by workforce. Degressivity follows three regimes
//! over rated turnover T, applied to each activity's (d1, d2) pair:
//! - 70,000 <= T <= 250,000: flat at d1
//! - 250,000 < T <= 500,000: linear from 1.0 down to d1
//! - 500,000 < T < 1,000,000: linear from d1 down to d2
//! - T = 1,000,000: flat at d1, the same as the 70,000 edge
//!
//! Outside these bounds no factor is produced and rates are left undiscounted.

use crate::tables::RateTable;
use serde::{Deserialize, Serialize};

/// Minimum turnover per full-time employee
pub const TURNOVER_PER_FTE: f64 = 70_000.0;

/// Lower bound of the degressivity curve
pub const DEGRESSIVITY_FLOOR: f64 = 70_000.0;

/// Upper bound of the flat regime; rates are discounted only above it
pub const FLAT_REGIME_CEILING: f64 = 250_000.0;

/// Turnover at which the d1 factor is reached
pub const D1_TURNOVER: f64 = 500_000.0;

/// Last turnover with a degressivity factor; rated at the flat value
pub const DEGRESSIVITY_CEILING: f64 = 1_000_000.0;

/// Turnover used for pricing: the larger of the declared and workforce-derived amounts
pub fn rated_turnover(workforce_fte: f64, declared_turnover: f64) -> f64 {
    (workforce_fte * TURNOVER_PER_FTE).max(declared_turnover)
}

/// Position of a turnover on the degressivity curve, independent of activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DegressivityRegime {
    /// Flat at d1
    Flat,
    /// Between 250k and 500k; progress in (0, 1]
    Ramp { progress: f64 },
    /// Between 500k and 1M; progress in (0, 1)
    Deep { progress: f64 },
    /// No degressivity
    OutOfRange,
}

impl DegressivityRegime {
    pub fn for_turnover(turnover: f64) -> Self {
        if !(DEGRESSIVITY_FLOOR..=DEGRESSIVITY_CEILING).contains(&turnover) {
            DegressivityRegime::OutOfRange
        } else if turnover <= FLAT_REGIME_CEILING || turnover == DEGRESSIVITY_CEILING {
            DegressivityRegime::Flat
        } else if turnover <= D1_TURNOVER {
            DegressivityRegime::Ramp {
                progress: (turnover - FLAT_REGIME_CEILING) / (D1_TURNOVER - FLAT_REGIME_CEILING),
            }
        } else {
            DegressivityRegime::Deep {
                progress: (turnover - D1_TURNOVER) / (DEGRESSIVITY_CEILING - D1_TURNOVER),
            }
        }
    }

    /// Factor for an activity's (d1, d2) pair
    pub fn factor(&self, d1: f64, d2: f64) -> Option<f64> {
        match *self {
            DegressivityRegime::Flat => Some(d1),
            DegressivityRegime::Ramp { progress } => Some(1.0 - (1.0 - d1) * progress),
            DegressivityRegime::Deep { progress } => Some(d1 - (d1 - d2) * progress),
            DegressivityRegime::OutOfRange => None,
        }
    }
}

/// Resolved factor for one rate table entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegressivityEntry {
    pub code: u8,
    pub d1: f64,
    pub d2: f64,
    pub factor: Option<f64>,
}

/// Degressivity resolved for every entry of the rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegressivityTable {
    pub regime: DegressivityRegime,
    pub entries: Vec<DegressivityEntry>,
}

impl DegressivityTable {
    /// Resolve the whole table for a rated turnover
    pub fn resolve(rates: &RateTable, turnover: f64) -> Self {
        let regime = DegressivityRegime::for_turnover(turnover);
        let entries = rates
            .entries()
            .iter()
            .map(|rate| DegressivityEntry {
                code: rate.code,
                d1: rate.d1,
                d2: rate.d2,
                factor: regime.factor(rate.d1, rate.d2),
            })
            .collect();

        Self { regime, entries }
    }

    pub fn entry(&self, code: u8) -> Option<&DegressivityEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Factor for a code, if one was produced
    pub fn factor(&self, code: u8) -> Option<f64> {
        self.entry(code).and_then(|e| e.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rated_turnover_floor() {
        assert_eq!(rated_turnover(3.0, 500_000.0), 500_000.0);
        assert_eq!(rated_turnover(1.0, 40_000.0), 70_000.0);
        assert_eq!(rated_turnover(4.0, 100_000.0), 280_000.0);
    }

    #[test]
    fn test_regimes() {
        assert_eq!(DegressivityRegime::for_turnover(69_999.0), DegressivityRegime::OutOfRange);
        assert_eq!(DegressivityRegime::for_turnover(70_000.0), DegressivityRegime::Flat);
        assert_eq!(DegressivityRegime::for_turnover(250_000.0), DegressivityRegime::Flat);
        assert_eq!(
            DegressivityRegime::for_turnover(375_000.0),
            DegressivityRegime::Ramp { progress: 0.5 }
        );
        assert_eq!(
            DegressivityRegime::for_turnover(750_000.0),
            DegressivityRegime::Deep { progress: 0.5 }
        );
        assert_eq!(DegressivityRegime::for_turnover(1_000_000.0), DegressivityRegime::Flat);
        assert_eq!(DegressivityRegime::for_turnover(1_000_000.01), DegressivityRegime::OutOfRange);
    }

    #[test]
    fn test_factor_values() {
        let (d1, d2) = (0.85, 0.70);

        assert_eq!(DegressivityRegime::for_turnover(70_000.0).factor(d1, d2), Some(d1));
        assert_eq!(DegressivityRegime::for_turnover(500_000.0).factor(d1, d2), Some(d1));
        assert_relative_eq!(
            DegressivityRegime::for_turnover(375_000.0).factor(d1, d2).unwrap(),
            0.925,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            DegressivityRegime::for_turnover(750_000.0).factor(d1, d2).unwrap(),
            0.775,
            epsilon = 1e-12
        );
        assert_eq!(DegressivityRegime::for_turnover(2_000_000.0).factor(d1, d2), None);
    }

    #[test]
    fn test_range_edges_take_flat_value() {
        let (d1, d2) = (0.85, 0.70);
        let flat = DegressivityRegime::Flat.factor(d1, d2);

        assert_eq!(DegressivityRegime::for_turnover(70_000.0).factor(d1, d2), flat);
        assert_eq!(DegressivityRegime::for_turnover(1_000_000.0).factor(d1, d2), flat);

        // Still discounted just below the ceiling
        let below = DegressivityRegime::for_turnover(999_999.0).factor(d1, d2).unwrap();
        assert_relative_eq!(below, d2, epsilon = 1e-5);

        let rates = RateTable::default_nomenclature();
        let table = DegressivityTable::resolve(&rates, 1_000_000.0);
        assert!(table.entries.iter().all(|e| e.factor == Some(e.d1)));
    }

    #[test]
    fn test_continuity_at_breakpoints() {
        let (d1, d2) = (0.85, 0.70);
        // Just above 250k the ramp starts at 1.0
        let above_flat = DegressivityRegime::for_turnover(250_000.01).factor(d1, d2).unwrap();
        assert_relative_eq!(above_flat, 1.0, epsilon = 1e-6);

        // Both sides of 500k meet at d1
        let below = DegressivityRegime::for_turnover(499_999.99).factor(d1, d2).unwrap();
        let above = DegressivityRegime::for_turnover(500_000.01).factor(d1, d2).unwrap();
        assert_relative_eq!(below, d1, epsilon = 1e-6);
        assert_relative_eq!(above, d1, epsilon = 1e-6);
    }

    #[test]
    fn test_table_resolves_every_entry() {
        let rates = RateTable::default_nomenclature();
        let table = DegressivityTable::resolve(&rates, 500_000.0);

        assert_eq!(table.entries.len(), 20);
        assert_eq!(table.factor(1), Some(0.85));
        for entry in &table.entries {
            assert_eq!(entry.factor, Some(entry.d1));
        }

        let out = DegressivityTable::resolve(&rates, 1_500_000.0);
        assert!(out.entries.iter().all(|e| e.factor.is_none()));
    }
}
