//! Reference list of insurers known to have defaulted on construction liability

use serde::{Deserialize, Serialize};

/// Names of defaulting insurers, stored normalized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultingInsurers {
    names: Vec<String>,
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl DefaultingInsurers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Carriers withdrawn from the French construction market after failing
    pub fn known_defaults() -> Self {
        Self::new([
            "Alpha Insurance",
            "CBL Insurance Europe",
            "Elite Insurance",
            "Enterprise Insurance",
            "Gable Insurance",
            "Lamp Insurance",
            "Qudos Insurance",
            "SFS Europe",
            "Casualty & General Insurance",
        ])
    }

    /// Case- and spacing-insensitive lookup
    pub fn contains(&self, name: &str) -> bool {
        let key = normalize(name);
        !key.is_empty() && self.names.binary_search(&key).is_ok()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes() {
        let list = DefaultingInsurers::known_defaults();
        assert!(list.contains("Elite Insurance"));
        assert!(list.contains("  elite   INSURANCE "));
        assert!(!list.contains("Some Mutual"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_dedup() {
        let list = DefaultingInsurers::new(["A Re", "a re", " "]);
        assert_eq!(list.len(), 1);
    }
}
