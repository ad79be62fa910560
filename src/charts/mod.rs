//! Charts module - interactive plotting and static export

mod export;
mod plotter;

pub use export::ChartExporter;
pub use plotter::{ChartPlotter, GeographyViewData, InvestorViewData};
