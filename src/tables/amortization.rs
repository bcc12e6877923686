//! Amortization of inherited decennial liability by elapsed half-year

use crate::error::RetroactiveError;
use serde::{Deserialize, Serialize};

/// Number of half-year buckets in the standard table (0 to 25 years)
pub const HALF_YEAR_BUCKETS: usize = 51;

/// Residual liability factor by elapsed half-year (index 0 = most recent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationTable {
    factors: Vec<f64>,
}

impl AmortizationTable {
    /// Create from loaded CSV data
    pub fn from_loaded(factors: &[f64]) -> Self {
        Self {
            factors: factors.to_vec(),
        }
    }

    /// Standard table: 0.70 for the most recent half-year, decreasing by 0.014
    /// per half-year to nil after 25 years
    pub fn standard() -> Self {
        Self {
            factors: vec![
                0.700, 0.686, 0.672, 0.658, 0.644, 0.630, 0.616, 0.602, 0.588, 0.574, // 0-4.5y
                0.560, 0.546, 0.532, 0.518, 0.504, 0.490, 0.476, 0.462, 0.448, 0.434, // 5-9.5y
                0.420, 0.406, 0.392, 0.378, 0.364, 0.350, 0.336, 0.322, 0.308, 0.294, // 10-14.5y
                0.280, 0.266, 0.252, 0.238, 0.224, 0.210, 0.196, 0.182, 0.168, 0.154, // 15-19.5y
                0.140, 0.126, 0.112, 0.098, 0.084, 0.070, 0.056, 0.042, 0.028, 0.014, // 20-24.5y
                0.000, // 25y
            ],
        }
    }

    /// Factor for an elapsed half-year bucket; nil beyond the table
    pub fn factor(&self, half_years: usize) -> f64 {
        self.factors.get(half_years).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Check the table is usable: non-empty, factors in [0, 1], never increasing
    pub fn validate(&self) -> Result<(), RetroactiveError> {
        if self.factors.is_empty() {
            return Err(RetroactiveError::EmptyAmortizationTable);
        }
        for (index, &value) in self.factors.iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(RetroactiveError::InvalidAmortizationFactor { index, value });
            }
            if index > 0 && value > self.factors[index - 1] {
                return Err(RetroactiveError::NonMonotonicAmortization(index));
            }
        }
        Ok(())
    }
}

impl Default for AmortizationTable {
    fn default() -> Self {
        Self::standard()
    }
}
