//! Risk declaration structures matching the quote form

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

fn default_territory() -> String {
    "FR".to_string()
}

/// Read a share-like value as a 0-1 fraction.
/// Values above 1 are taken as percentages (e.g. 25 => 0.25).
pub fn as_fraction(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// Period without coverage before the quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InactivityPeriod {
    /// Continuously covered
    #[default]
    None,
    /// Between 6 and 12 months without coverage
    SixToTwelveMonths,
    /// More than 12 months without coverage
    OverTwelveMonths,
    /// Company never covered (creation)
    NewCompany,
}

/// Answer to the "claims over the last 5 years" question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClaimsHistory {
    /// No claims declared
    #[default]
    NoClaims,
    /// Claims declared (detailed in past claims)
    WithClaims,
    /// History unavailable because the prior insurer defaulted
    InsurerDefaulted,
}

/// Payment frequency of the annual premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InstalmentFrequency {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl InstalmentFrequency {
    /// Number of instalments per policy year
    pub fn instalment_count(&self) -> u32 {
        match self {
            InstalmentFrequency::Annual => 1,
            InstalmentFrequency::SemiAnnual => 2,
            InstalmentFrequency::Quarterly => 4,
            InstalmentFrequency::Monthly => 12,
        }
    }

    /// Length of one instalment period in months
    pub fn period_months(&self) -> u32 {
        12 / self.instalment_count()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstalmentFrequency::Annual => "annual",
            InstalmentFrequency::SemiAnnual => "semi-annual",
            InstalmentFrequency::Quarterly => "quarterly",
            InstalmentFrequency::Monthly => "monthly",
        }
    }
}

/// One declared activity and its weight in turnover
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityShare {
    /// Activity code (1-20)
    pub code: u8,

    /// Share of turnover, either 0-1 or 0-100
    pub share: f64,
}

/// Claims recorded for one past year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PastClaim {
    pub year: i32,
    pub claim_count: u32,
    pub total_cost: f64,
}

/// A risk declaration assembled from the quote form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskDeclaration {
    /// Declared annual turnover
    pub declared_turnover: f64,

    /// Workforce in full-time equivalents
    pub workforce_fte: f64,

    /// Company creation date
    pub creation_date: NaiveDate,

    /// Period without coverage before the quote
    #[serde(default)]
    pub inactivity: InactivityPeriod,

    /// Years of experience of the operator
    pub experience_years: f64,

    /// Declared activities
    pub activities: Vec<ActivityShare>,

    #[serde(default)]
    pub is_new_company: bool,

    #[serde(default)]
    pub is_qualified_tradesperson: bool,

    /// Share of turnover subcontracted (0-1 or 0-100)
    #[serde(default)]
    pub subcontracted_share: f64,

    /// Share of turnover from resale of materials (0-1 or 0-100)
    #[serde(default)]
    pub resale_share: f64,

    #[serde(default)]
    pub prior_insurer_defaulted: bool,

    #[serde(default)]
    pub missing_balance_sheet: bool,

    /// Inactive for more than 12 months without closing the company
    #[serde(default)]
    pub inactive_without_closure: bool,

    #[serde(default)]
    pub claims_history: ClaimsHistory,

    #[serde(default)]
    pub wants_retroactive_cover: bool,

    #[serde(default)]
    pub wants_legal_protection: bool,

    /// Name of the previous insurer, if any
    #[serde(default)]
    pub prior_insurer: Option<String>,

    /// Years of continuous coverage with the previous insurer
    #[serde(default)]
    pub continuous_coverage_years: f64,

    #[serde(default)]
    pub frequency: InstalmentFrequency,

    /// Effective date of the new policy
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,

    /// End date of the previous coverage
    #[serde(default)]
    pub prior_coverage_end: Option<NaiveDate>,

    #[serde(default)]
    pub past_claims: Vec<PastClaim>,

    /// Tax territory (key into the configured tax table)
    #[serde(default = "default_territory")]
    pub territory: String,
}

impl RiskDeclaration {
    /// Create a declaration with the required fields, every flag off
    pub fn new(
        declared_turnover: f64,
        workforce_fte: f64,
        creation_date: NaiveDate,
        experience_years: f64,
        activities: Vec<ActivityShare>,
    ) -> Self {
        Self {
            declared_turnover,
            workforce_fte,
            creation_date,
            inactivity: InactivityPeriod::None,
            experience_years,
            activities,
            is_new_company: false,
            is_qualified_tradesperson: false,
            subcontracted_share: 0.0,
            resale_share: 0.0,
            prior_insurer_defaulted: false,
            missing_balance_sheet: false,
            inactive_without_closure: false,
            claims_history: ClaimsHistory::NoClaims,
            wants_retroactive_cover: false,
            wants_legal_protection: false,
            prior_insurer: None,
            continuous_coverage_years: 0.0,
            frequency: InstalmentFrequency::Annual,
            effective_date: None,
            prior_coverage_end: None,
            past_claims: Vec::new(),
            territory: default_territory(),
        }
    }

    /// Copy with every share-like field expressed as a 0-1 fraction
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        for activity in &mut out.activities {
            activity.share = as_fraction(activity.share);
        }
        out.subcontracted_share = as_fraction(self.subcontracted_share);
        out.resale_share = as_fraction(self.resale_share);
        out
    }

    /// Sum of activity shares as a fraction
    pub fn total_share(&self) -> f64 {
        self.activities.iter().map(|a| as_fraction(a.share)).sum()
    }

    /// Number of declared activities
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Company age in years at a given date.
    /// Whole years count calendar anniversaries; the remainder is the elapsed
    /// fraction of the current anniversary year.
    pub fn company_age_years(&self, as_of: NaiveDate) -> f64 {
        if as_of <= self.creation_date {
            return 0.0;
        }
        let anniversary = |years: i32| {
            self.creation_date
                .checked_add_months(Months::new(12 * years.max(0) as u32))
        };

        let mut whole = as_of.year() - self.creation_date.year();
        while whole > 0 && anniversary(whole).map_or(true, |d| d > as_of) {
            whole -= 1;
        }
        let (Some(start), Some(next)) = (anniversary(whole), anniversary(whole + 1)) else {
            return whole as f64;
        };

        let elapsed = (as_of - start).num_days() as f64;
        let year_days = (next - start).num_days() as f64;
        whole as f64 + elapsed / year_days
    }
}
