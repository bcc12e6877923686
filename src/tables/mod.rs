//! Static reference tables: activity rates, liability amortization, defaulting insurers
//!
//! Tables are built once (in memory or from CSV) and shared read-only by every
//! rating call.

mod rates;
mod amortization;
mod insurers;
pub mod loader;

pub use rates::{ActivityRate, RateTable, ACTIVITY_COUNT};
pub use amortization::{AmortizationTable, HALF_YEAR_BUCKETS};
pub use insurers::DefaultingInsurers;
pub use loader::LoadedTables;

use std::path::Path;

/// Container for all rating reference data
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub rates: RateTable,
    pub amortization: AmortizationTable,
    pub defaulting_insurers: DefaultingInsurers,
}

impl ReferenceTables {
    /// Create tables with the built-in reference values
    pub fn default_pricing() -> Self {
        Self {
            rates: RateTable::default_nomenclature(),
            amortization: AmortizationTable::standard(),
            defaulting_insurers: DefaultingInsurers::known_defaults(),
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedTables::load_from(path)?;

        Ok(Self {
            rates: RateTable::from_loaded(loaded.activity_rates),
            amortization: AmortizationTable::from_loaded(&loaded.amortization),
            defaulting_insurers: DefaultingInsurers::new(&loaded.defaulting_insurers),
        })
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::default_pricing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_matches_builtin() {
        let csv = ReferenceTables::from_csv().expect("Failed to load tables");
        let builtin = ReferenceTables::default_pricing();

        assert_eq!(csv.rates.entries(), builtin.rates.entries());
        assert_eq!(csv.amortization, builtin.amortization);
        assert_eq!(csv.defaulting_insurers, builtin.defaulting_insurers);
    }
}
