//! Investor Aggregates
//! Tokenizes the `Select Investors` field and computes per-investor counts
//! and valuation sums.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::data::{COL_INVESTORS, COL_VALUATION};

/// Delimiter between investor names inside the `Select Investors` field.
const INVESTOR_DELIMITER: &str = ", ";

/// How many investors the ranking keeps.
pub const TOP_INVESTOR_COUNT: usize = 10;

/// One entry of the top-investor ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorCount {
    pub name: String,
    pub companies: u32,
}

/// Aggregates for a single selected investor.
///
/// Matching is by substring over the raw field text, so a name that is a
/// prefix of another investor's name also matches those rows. Documented
/// behavior, kept from the original dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct InvestorSummary {
    pub name: String,
    pub companies_funded: usize,
    pub total_valuation: f64,
}

/// Handles investor-centric aggregation over the loaded dataset.
pub struct InvestorStats;

impl InvestorStats {
    /// Split every record's investor field on the delimiter, count
    /// occurrences per distinct name, and keep the `TOP_INVESTOR_COUNT`
    /// most frequent. Ties keep first-encounter order (stable sort).
    pub fn top_investors(df: &DataFrame) -> Result<Vec<InvestorCount>, PolarsError> {
        let fields = df.column(COL_INVESTORS)?.str()?;

        let mut encounter_order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u32> = HashMap::new();

        for field in fields.into_iter().flatten() {
            for name in field.split(INVESTOR_DELIMITER) {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                match counts.entry(name.to_string()) {
                    Entry::Occupied(mut entry) => *entry.get_mut() += 1,
                    Entry::Vacant(entry) => {
                        encounter_order.push(name.to_string());
                        entry.insert(1);
                    }
                }
            }
        }

        let mut ranked: Vec<InvestorCount> = encounter_order
            .into_iter()
            .map(|name| {
                let companies = counts[&name];
                InvestorCount { name, companies }
            })
            .collect();
        ranked.sort_by(|a, b| b.companies.cmp(&a.companies));
        ranked.truncate(TOP_INVESTOR_COUNT);

        Ok(ranked)
    }

    /// Rows whose raw investor field contains `name` as a substring.
    fn filter_by_investor(df: &DataFrame, name: &str) -> Result<DataFrame, PolarsError> {
        df.clone()
            .lazy()
            .filter(col(COL_INVESTORS).str().contains_literal(lit(name)))
            .collect()
    }

    /// Funded-company count and summed valuation for one investor.
    pub fn summarize(df: &DataFrame, name: &str) -> Result<InvestorSummary, PolarsError> {
        let matched = Self::filter_by_investor(df, name)?;
        let total_valuation = matched.column(COL_VALUATION)?.f64()?.sum().unwrap_or(0.0);

        Ok(InvestorSummary {
            name: name.to_string(),
            companies_funded: matched.height(),
            total_valuation,
        })
    }

    /// Summed valuation per ranked investor, recomputed by re-filtering the
    /// full table for each entry.
    pub fn valuation_by_investor(df: &DataFrame, ranked: &[InvestorCount]) -> Vec<f64> {
        ranked
            .par_iter()
            .map(|investor| {
                Self::summarize(df, &investor.name)
                    .map(|summary| summary.total_valuation)
                    .unwrap_or(0.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample_frame() -> DataFrame {
        df!(
            COL_INVESTORS => [
                "Sequoia Capital, Accel",
                "Sequoia Capital China, Accel",
                "Sequoia Capital",
                "Tiger Global Management",
            ],
            COL_VALUATION => [4.0f64, 2.5, 1.0, 10.0],
        )
        .unwrap()
    }

    #[test]
    fn counts_token_occurrences() {
        let ranked = InvestorStats::top_investors(&sample_frame()).unwrap();
        assert_eq!(
            ranked[0],
            InvestorCount {
                name: "Sequoia Capital".to_string(),
                companies: 2
            }
        );
        assert_eq!(
            ranked[1],
            InvestorCount {
                name: "Accel".to_string(),
                companies: 2
            }
        );
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let ranked = InvestorStats::top_investors(&sample_frame()).unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        // Sequoia Capital and Accel both appear twice; Sequoia was seen first.
        assert_eq!(
            names,
            vec![
                "Sequoia Capital",
                "Accel",
                "Sequoia Capital China",
                "Tiger Global Management",
            ]
        );
    }

    #[test]
    fn ranking_is_capped_and_dominates_unlisted() {
        let fields: Vec<String> = (0..12).map(|i| format!("Investor {i:02}")).collect();
        let mut rows: Vec<String> = Vec::new();
        // Investor 00..09 appear twice, 10 and 11 once.
        for (i, name) in fields.iter().enumerate() {
            rows.push(name.clone());
            if i < 10 {
                rows.push(name.clone());
            }
        }
        let frame = df!(
            COL_INVESTORS => rows,
            COL_VALUATION => vec![1.0f64; 22],
        )
        .unwrap();

        let ranked = InvestorStats::top_investors(&frame).unwrap();
        assert_eq!(ranked.len(), TOP_INVESTOR_COUNT);
        let min_listed = ranked.iter().map(|r| r.companies).min().unwrap();
        assert!(min_listed >= 1);
        assert!(ranked.iter().all(|r| r.companies == 2));
    }

    #[test]
    fn summary_matches_by_substring() {
        // "Sequoia Capital" is a substring of "Sequoia Capital China", so the
        // second row over-matches. That is the documented behavior.
        let summary = InvestorStats::summarize(&sample_frame(), "Sequoia Capital").unwrap();
        assert_eq!(summary.companies_funded, 3);
        assert!((summary.total_valuation - 7.5).abs() < 1e-9);
    }

    #[test]
    fn summary_of_exact_token() {
        let summary = InvestorStats::summarize(&sample_frame(), "Tiger Global Management").unwrap();
        assert_eq!(summary.companies_funded, 1);
        assert!((summary.total_valuation - 10.0).abs() < 1e-9);
    }

    #[test]
    fn valuation_sweep_matches_individual_summaries() {
        let frame = sample_frame();
        let ranked = InvestorStats::top_investors(&frame).unwrap();
        let sums = InvestorStats::valuation_by_investor(&frame, &ranked);
        assert_eq!(sums.len(), ranked.len());
        for (investor, &sum) in ranked.iter().zip(sums.iter()) {
            let summary = InvestorStats::summarize(&frame, &investor.name).unwrap();
            assert!((summary.total_valuation - sum).abs() < 1e-9);
        }
    }
}
