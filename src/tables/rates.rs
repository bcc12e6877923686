//! Activity rate table: base rate and maximum-regime degressivity pair per activity

use serde::{Deserialize, Serialize};

/// Number of activity codes in the nomenclature
pub const ACTIVITY_COUNT: usize = 20;

/// Rate entry for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRate {
    /// Activity code (1-20)
    pub code: u8,

    /// Trade label
    pub label: String,

    /// Base rate applied to turnover
    pub base_rate: f64,

    /// Degressivity factor reached at 500,000 turnover
    pub d1: f64,

    /// Degressivity factor approached at 1,000,000 turnover
    pub d2: f64,
}

impl ActivityRate {
    fn new(code: u8, label: &str, base_rate: f64, d1: f64, d2: f64) -> Self {
        Self {
            code,
            label: label.to_string(),
            base_rate,
            d1,
            d2,
        }
    }
}

/// Rate table indexed by activity code
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Entries ordered by code (index = code - 1)
    entries: Vec<ActivityRate>,
}

impl RateTable {
    /// Create from loaded CSV data, ordering entries by code
    pub fn from_loaded(mut entries: Vec<ActivityRate>) -> Self {
        entries.sort_by_key(|e| e.code);
        Self { entries }
    }

    /// Default construction trades nomenclature
    pub fn default_nomenclature() -> Self {
        Self {
            entries: vec![
                ActivityRate::new(1, "Masonry and reinforced concrete", 0.0185, 0.85, 0.70),
                ActivityRate::new(2, "Timber framing and structures", 0.0210, 0.85, 0.72),
                ActivityRate::new(3, "Roofing", 0.0230, 0.87, 0.75),
                ActivityRate::new(4, "Plumbing and sanitary installations", 0.0120, 0.88, 0.76),
                ActivityRate::new(5, "Electrical installations", 0.0105, 0.88, 0.76),
                ActivityRate::new(6, "Plastering and drywall", 0.0095, 0.90, 0.80),
                ActivityRate::new(7, "Interior joinery", 0.0090, 0.90, 0.80),
                ActivityRate::new(8, "Exterior joinery and glazing", 0.0140, 0.88, 0.78),
                ActivityRate::new(9, "Tiling and hard floor coverings", 0.0110, 0.90, 0.80),
                ActivityRate::new(10, "Painting and decoration", 0.0070, 0.92, 0.82),
                ActivityRate::new(11, "Heating, ventilation and air conditioning", 0.0135, 0.87, 0.76),
                ActivityRate::new(12, "Thermal insulation", 0.0150, 0.88, 0.78),
                ActivityRate::new(13, "Waterproofing", 0.0290, 0.85, 0.72),
                ActivityRate::new(14, "Earthworks and utilities", 0.0125, 0.88, 0.78),
                ActivityRate::new(15, "Demolition", 0.0100, 0.90, 0.80),
                ActivityRate::new(16, "Metalwork and locksmithing", 0.0145, 0.88, 0.78),
                ActivityRate::new(17, "Facade rendering and cleaning", 0.0160, 0.87, 0.76),
                ActivityRate::new(18, "Soft floor coverings", 0.0085, 0.92, 0.82),
                ActivityRate::new(19, "Chimneys and flues", 0.0175, 0.86, 0.74),
                ActivityRate::new(20, "Swimming pools", 0.0250, 0.85, 0.72),
            ],
        }
    }

    /// Get the entry for an activity code
    pub fn get(&self, code: u8) -> Option<&ActivityRate> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Check whether a code exists in the table
    pub fn contains(&self, code: u8) -> bool {
        self.get(code).is_some()
    }

    pub fn entries(&self) -> &[ActivityRate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::default_nomenclature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_complete() {
        let table = RateTable::default_nomenclature();
        assert_eq!(table.len(), ACTIVITY_COUNT);

        for code in 1..=20u8 {
            let entry = table.get(code).expect("missing activity code");
            assert_eq!(entry.code, code);
            assert!(entry.base_rate > 0.0);
            // d2 is the deeper discount
            assert!(entry.d2 < entry.d1 && entry.d1 < 1.0);
        }
        assert!(table.get(0).is_none());
        assert!(table.get(21).is_none());
    }

    #[test]
    fn test_masonry_degressivity() {
        let table = RateTable::default_nomenclature();
        let masonry = table.get(1).unwrap();
        assert_eq!(masonry.d1, 0.85);
        assert_eq!(masonry.d2, 0.70);
    }

    #[test]
    fn test_from_loaded_sorts() {
        let table = RateTable::from_loaded(vec![
            ActivityRate::new(2, "b", 0.02, 0.9, 0.8),
            ActivityRate::new(1, "a", 0.01, 0.9, 0.8),
        ]);
        assert_eq!(table.entries()[0].code, 1);
        assert!(table.contains(2));
    }
}
