//! Stats module - investor and geography aggregates

mod geography;
mod investors;

pub use geography::{CountrySeries, GeographyStats, IndustryPivot};
pub use investors::{InvestorCount, InvestorStats, InvestorSummary, TOP_INVESTOR_COUNT};
