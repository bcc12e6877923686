//! Risk declaration data structures and loading

mod data;
pub mod loader;

pub use data::{
    as_fraction, ActivityShare, ClaimsHistory, InactivityPeriod, InstalmentFrequency, PastClaim,
    RiskDeclaration,
};
pub use loader::{load_declaration, load_declarations, load_past_claims};
