//! RCD Rating - Premium rating and payment-schedule engine for decennial liability policies
//!
//! This library provides:
//! - Eligibility screening of a risk declaration
//! - Degressive, activity-weighted base premium
//! - Risk surcharges (majorations) composed into a single loading
//! - Ancillary costs (management fee, insurance tax, legal protection, splitting fee)
//! - Dated instalment schedules
//! - Retroactive ("reprise du passé") coverage pricing

pub mod error;
pub mod config;
pub mod declaration;
pub mod tables;
pub mod rating;
pub mod schedule;
pub mod retroactive;
pub mod runner;

// Re-export commonly used types
pub use error::{RatingError, RetroactiveError};
pub use config::PricingConfig;
pub use declaration::{RiskDeclaration, ActivityShare, PastClaim, InstalmentFrequency};
pub use tables::{ReferenceTables, RateTable, AmortizationTable, DefaultingInsurers};
pub use rating::{RatingEngine, RatingResult};
pub use schedule::Instalment;
pub use retroactive::RetroactiveCoverageResult;
pub use runner::QuoteRunner;
