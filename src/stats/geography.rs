//! Geography Aggregates
//! Per-country time series and the year x industry pivot.

use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::data::{COL_COUNTRY, COL_INDUSTRY, COL_YEAR_JOINED};

/// Companies joined per year for one country, years ascending.
#[derive(Debug, Clone, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<(i32, u32)>,
}

impl CountrySeries {
    /// Total companies across all years; equals the country's row count.
    pub fn total(&self) -> u32 {
        self.points.iter().map(|(_, count)| count).sum()
    }
}

/// Year x industry count pivot for one country, zero-filled.
#[derive(Debug, Clone, Serialize)]
pub struct IndustryPivot {
    pub country: String,
    /// Row labels, ascending.
    pub years: Vec<i32>,
    /// Column labels, ascending.
    pub industries: Vec<String>,
    /// `counts[row][col]` = companies joined in `years[row]` within
    /// `industries[col]`. Every combination is present.
    pub counts: Vec<Vec<u32>>,
}

impl IndustryPivot {
    pub fn max_count(&self) -> u32 {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Cell lookup by labels.
    #[allow(dead_code)]
    pub fn get(&self, year: i32, industry: &str) -> Option<u32> {
        let row = self.years.iter().position(|&y| y == year)?;
        let col = self.industries.iter().position(|i| i == industry)?;
        Some(self.counts[row][col])
    }
}

/// Handles country-centric aggregation over the loaded dataset.
pub struct GeographyStats;

impl GeographyStats {
    fn filter_by_country(df: &DataFrame, country: &str) -> Result<DataFrame, PolarsError> {
        df.clone()
            .lazy()
            .filter(col(COL_COUNTRY).eq(lit(country)))
            .collect()
    }

    /// Companies joined per year for `country`, ordered by year ascending.
    pub fn unicorns_per_year(df: &DataFrame, country: &str) -> Result<CountrySeries, PolarsError> {
        let country_df = Self::filter_by_country(df, country)?;
        let years = country_df.column(COL_YEAR_JOINED)?.i32()?;

        let mut per_year: BTreeMap<i32, u32> = BTreeMap::new();
        for year in years.into_iter().flatten() {
            *per_year.entry(year).or_insert(0) += 1;
        }

        Ok(CountrySeries {
            country: country.to_string(),
            points: per_year.into_iter().collect(),
        })
    }

    /// Year x industry pivot for `country`. Combinations with no companies
    /// are zero, never absent.
    pub fn industry_pivot(df: &DataFrame, country: &str) -> Result<IndustryPivot, PolarsError> {
        let country_df = Self::filter_by_country(df, country)?;
        let years_col = country_df.column(COL_YEAR_JOINED)?.i32()?;
        let industries_col = country_df.column(COL_INDUSTRY)?.str()?;

        let mut cells: BTreeMap<(i32, String), u32> = BTreeMap::new();
        let mut year_labels: BTreeSet<i32> = BTreeSet::new();
        let mut industry_labels: BTreeSet<String> = BTreeSet::new();

        for (year, industry) in years_col.into_iter().zip(industries_col.into_iter()) {
            let (Some(year), Some(industry)) = (year, industry) else {
                continue;
            };
            year_labels.insert(year);
            industry_labels.insert(industry.to_string());
            *cells.entry((year, industry.to_string())).or_insert(0) += 1;
        }

        let years: Vec<i32> = year_labels.into_iter().collect();
        let industries: Vec<String> = industry_labels.into_iter().collect();
        let counts: Vec<Vec<u32>> = years
            .iter()
            .map(|&year| {
                industries
                    .iter()
                    .map(|industry| {
                        cells
                            .get(&(year, industry.clone()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        Ok(IndustryPivot {
            country: country.to_string(),
            years,
            industries,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample_frame() -> DataFrame {
        df!(
            COL_COUNTRY => ["US", "US", "US", "France", "US"],
            COL_INDUSTRY => ["Fintech", "Fintech", "Edtech", "Fintech", "Healthtech"],
            COL_YEAR_JOINED => [2015i32, 2015, 2016, 2015, 2016],
        )
        .unwrap()
    }

    #[test]
    fn per_year_counts_are_ascending_and_sum_to_total() {
        let series = GeographyStats::unicorns_per_year(&sample_frame(), "US").unwrap();
        assert_eq!(series.points, vec![(2015, 2), (2016, 2)]);
        assert_eq!(series.total(), 4);
    }

    #[test]
    fn per_year_counts_exclude_other_countries() {
        let series = GeographyStats::unicorns_per_year(&sample_frame(), "France").unwrap();
        assert_eq!(series.points, vec![(2015, 1)]);
    }

    #[test]
    fn unknown_country_yields_empty_series() {
        let series = GeographyStats::unicorns_per_year(&sample_frame(), "Japan").unwrap();
        assert!(series.points.is_empty());
        assert_eq!(series.total(), 0);
    }

    #[test]
    fn pivot_counts_combinations_with_zero_fill() {
        // {(US, Fintech, 2015) x2, (US, Edtech, 2016)} pivots to
        // (2015, Fintech) = 2, (2016, Edtech) = 1, (2015, Edtech) = 0.
        let frame = df!(
            COL_COUNTRY => ["US", "US", "US"],
            COL_INDUSTRY => ["Fintech", "Fintech", "Edtech"],
            COL_YEAR_JOINED => [2015i32, 2015, 2016],
        )
        .unwrap();
        let pivot = GeographyStats::industry_pivot(&frame, "US").unwrap();

        assert_eq!(pivot.years, vec![2015, 2016]);
        assert_eq!(pivot.industries, vec!["Edtech", "Fintech"]);
        assert_eq!(pivot.get(2015, "Fintech"), Some(2));
        assert_eq!(pivot.get(2016, "Edtech"), Some(1));
        assert_eq!(pivot.get(2015, "Edtech"), Some(0));
        assert_eq!(pivot.get(2016, "Fintech"), Some(0));
    }

    #[test]
    fn pivot_grid_is_fully_populated() {
        let pivot = GeographyStats::industry_pivot(&sample_frame(), "US").unwrap();
        assert_eq!(pivot.counts.len(), pivot.years.len());
        for row in &pivot.counts {
            assert_eq!(row.len(), pivot.industries.len());
        }
        let cell_sum: u32 = pivot.counts.iter().flatten().sum();
        assert_eq!(cell_sum, 4);
        assert_eq!(pivot.max_count(), 2);
    }

    #[test]
    fn pivot_is_scoped_to_the_country() {
        let pivot = GeographyStats::industry_pivot(&sample_frame(), "France").unwrap();
        assert_eq!(pivot.years, vec![2015]);
        assert_eq!(pivot.industries, vec!["Fintech"]);
        assert_eq!(pivot.counts, vec![vec![1]]);
    }
}
