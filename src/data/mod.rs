//! Data module - CSV loading and normalization

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{
    DataProcessor, ProcessorError, COL_COUNTRY, COL_DATE_JOINED, COL_INDUSTRY, COL_INVESTORS,
    COL_VALUATION, COL_YEAR_JOINED,
};
