//! CSV Data Loader Module
//! Handles loading the unicorns CSV and column-level queries using Polars.

use polars::prelude::*;
use thiserror::Error;

use super::processor::COL_COUNTRY;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Holds the loaded (already normalized) dataset for the session.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Read a CSV file into a raw DataFrame.
    pub fn read_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10_000))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Distinct country values, sorted ascending.
    pub fn countries(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.column(COL_COUNTRY)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut names: Vec<String> = series
                    .iter()
                    .filter_map(|val| {
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                names.sort();
                names
            })
            .unwrap_or_default()
    }

    /// Number of rows in the loaded dataset.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Install a DataFrame loaded elsewhere (background thread).
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_csv_into_frame() {
        let path = write_temp_csv(
            "unicorn_loader_reads.csv",
            "Company,Country\nAlpha,France\nBeta,France\n",
        );
        let frame = DataLoader::read_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(DataLoader::read_csv("./no-such-file.csv").is_err());
    }

    #[test]
    fn countries_are_distinct_and_sorted() {
        let mut loader = DataLoader::new();
        loader.set_dataframe(
            df!(
                COL_COUNTRY => ["Sweden", "France", "Sweden", "Brazil"],
            )
            .unwrap(),
        );
        assert_eq!(loader.countries(), vec!["Brazil", "France", "Sweden"]);
        assert_eq!(loader.row_count(), 4);
    }

    #[test]
    fn empty_loader_answers_defaults() {
        let loader = DataLoader::new();
        assert!(loader.countries().is_empty());
        assert_eq!(loader.row_count(), 0);
        assert!(loader.dataframe().is_none());
    }
}
