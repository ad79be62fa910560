//! Dataset Normalizer
//! Turns the raw unicorns CSV frame into the analysis frame.

use polars::prelude::*;
use thiserror::Error;

/// Column names of the unicorns dataset.
pub const COL_COUNTRY: &str = "Country";
pub const COL_INDUSTRY: &str = "Industry";
pub const COL_DATE_JOINED: &str = "Date Joined";
pub const COL_VALUATION: &str = "Valuation ($B)";
pub const COL_INVESTORS: &str = "Select Investors";
/// Derived during normalization: calendar year of `Date Joined`.
pub const COL_YEAR_JOINED: &str = "Year Joined";

/// Columns the dashboard cannot work without.
const REQUIRED_COLUMNS: [&str; 5] = [
    COL_COUNTRY,
    COL_INDUSTRY,
    COL_DATE_JOINED,
    COL_VALUATION,
    COL_INVESTORS,
];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Handles the one-time normalization pass over the loaded dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// Normalize the raw frame:
    /// - strip the leading `$` from the valuation column and cast to `f64`,
    /// - parse `Date Joined` into a date column,
    /// - derive the integer `Year Joined` column.
    ///
    /// Strict casts: a malformed valuation or unparseable date fails the
    /// whole load rather than producing nulls.
    pub fn normalize(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        for required in REQUIRED_COLUMNS {
            if df.column(required).is_err() {
                return Err(ProcessorError::MissingColumn(required.to_string()));
            }
        }

        let normalized = df
            .clone()
            .lazy()
            .with_columns([
                col(COL_VALUATION)
                    .str()
                    .strip_chars_start(lit("$"))
                    .strict_cast(DataType::Float64),
                col(COL_DATE_JOINED).str().to_date(StrptimeOptions::default()),
            ])
            .with_columns([col(COL_DATE_JOINED).dt().year().alias(COL_YEAR_JOINED)])
            .collect()?;

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample_frame() -> DataFrame {
        df!(
            "Company" => ["Alpha", "Beta", "Gamma"],
            COL_COUNTRY => ["United States", "Sweden", "United States"],
            COL_INDUSTRY => ["Fintech", "Edtech", "Fintech"],
            COL_DATE_JOINED => ["2015-04-07", "2016-01-12", "2015-11-30"],
            COL_VALUATION => ["$1.5", "$12", "$3.25"],
            COL_INVESTORS => ["Sequoia Capital, Accel", "Accel", "Tiger Global Management"],
        )
        .unwrap()
    }

    #[test]
    fn strips_currency_prefix_from_valuation() {
        let out = DataProcessor::normalize(&sample_frame()).unwrap();
        let valuations: Vec<f64> = out
            .column(COL_VALUATION)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(valuations, vec![1.5, 12.0, 3.25]);
    }

    #[test]
    fn derives_year_joined_from_date() {
        let out = DataProcessor::normalize(&sample_frame()).unwrap();
        let years: Vec<i32> = out
            .column(COL_YEAR_JOINED)
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(years, vec![2015, 2016, 2015]);
    }

    #[test]
    fn keeps_row_order_and_count() {
        let out = DataProcessor::normalize(&sample_frame()).unwrap();
        assert_eq!(out.height(), 3);
        let countries: Vec<&str> = out
            .column(COL_COUNTRY)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(countries, vec!["United States", "Sweden", "United States"]);
    }

    #[test]
    fn rejects_malformed_valuation() {
        let frame = df!(
            COL_COUNTRY => ["United States"],
            COL_INDUSTRY => ["Fintech"],
            COL_DATE_JOINED => ["2015-04-07"],
            COL_VALUATION => ["$1.5B"],
            COL_INVESTORS => ["Accel"],
        )
        .unwrap();
        assert!(DataProcessor::normalize(&frame).is_err());
    }

    #[test]
    fn rejects_unparseable_date() {
        let frame = df!(
            COL_COUNTRY => ["United States"],
            COL_INDUSTRY => ["Fintech"],
            COL_DATE_JOINED => ["not-a-date"],
            COL_VALUATION => ["$1.5"],
            COL_INVESTORS => ["Accel"],
        )
        .unwrap();
        assert!(DataProcessor::normalize(&frame).is_err());
    }

    #[test]
    fn rejects_missing_required_column() {
        let frame = df!(
            COL_COUNTRY => ["United States"],
            COL_INDUSTRY => ["Fintech"],
            COL_DATE_JOINED => ["2015-04-07"],
            COL_VALUATION => ["$1.5"],
        )
        .unwrap();
        let err = DataProcessor::normalize(&frame).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(ref c) if c == COL_INVESTORS));
    }
}
