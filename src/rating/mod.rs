//! Premium rating pipeline

pub mod eligibility;
pub mod degressivity;
pub mod activity;
pub mod majoration;
pub mod costs;
mod engine;

pub use eligibility::{Eligibility, RefusalReason};
pub use degressivity::{rated_turnover, DegressivityRegime, DegressivityTable};
pub use activity::{ActivityPremiumLine, ActivityPremiums};
pub use majoration::{Majoration, MajorationRule, MajorationSet};
pub use costs::CostBreakdown;
pub use engine::{RatingEngine, RatingResult};
