//! Earnings Value scorer
//!
//! The single-ratio screen: drop tickers without positive earnings and rank
//! the rest on raw P/E. No imputation and no percentiles.

use super::{ValueScorer, ensure_columns};
use crate::error::Result;
use crate::metrics::{PRICE, SYMBOL, ValueMetric};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the EarningsValue scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsValueConfig {
    /// Rows need a P/E strictly above this (default: 0.0)
    pub min_pe: f64,
}

impl Default for EarningsValueConfig {
    fn default() -> Self {
        Self { min_pe: 0.0 }
    }
}

/// Ranks on raw price-to-earnings, keeping positive P/E only.
#[derive(Debug, Clone, Default)]
pub struct EarningsValueScorer {
    config: EarningsValueConfig,
}

const REQUIRED: [&str; 3] = [SYMBOL, PRICE, ValueMetric::PriceToEarnings.column()];

impl EarningsValueScorer {
    /// Create a scorer with a custom configuration.
    pub const fn with_config(config: EarningsValueConfig) -> Self {
        Self { config }
    }

    /// The scorer's configuration.
    pub const fn config(&self) -> &EarningsValueConfig {
        &self.config
    }
}

impl ValueScorer for EarningsValueScorer {
    fn name(&self) -> &str {
        "PE Value Strategy"
    }

    fn required_columns(&self) -> &[&str] {
        &REQUIRED
    }

    fn rank_column(&self) -> &str {
        ValueMetric::PriceToEarnings.column()
    }

    fn compute_scores(&self, table: &DataFrame) -> Result<DataFrame> {
        ensure_columns(table, self.required_columns())?;

        let pe = ValueMetric::PriceToEarnings.column();
        let kept = table
            .clone()
            .lazy()
            .filter(col(pe).gt(lit(self.config.min_pe)))
            .collect()?;

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;

    fn table() -> DataFrame {
        df!(
            "symbol" => ["LOSS", "CHEAP", "NOPE", "RICH", "ZERO"],
            "price" => [5.0, 10.0, 20.0, 30.0, 40.0],
            "pe_ratio" => [Some(-3.0), Some(8.0), None, Some(45.0), Some(0.0)]
        )
        .unwrap()
    }

    #[test]
    fn test_keeps_positive_pe_only() {
        let scored = EarningsValueScorer::default()
            .compute_scores(&table())
            .unwrap();
        let symbols: Vec<&str> = scored
            .column("symbol")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(symbols, vec!["CHEAP", "RICH"]);
    }

    #[test]
    fn test_custom_threshold() {
        let scorer = EarningsValueScorer::with_config(EarningsValueConfig { min_pe: 10.0 });
        let scored = scorer.compute_scores(&table()).unwrap();
        assert_eq!(scored.height(), 1);
        assert_eq!(scorer.config().min_pe, 10.0);
    }

    #[test]
    fn test_only_needs_pe() {
        let scorer = EarningsValueScorer::default();
        assert_eq!(scorer.rank_column(), "pe_ratio");
        assert_eq!(scorer.required_columns(), &["symbol", "price", "pe_ratio"]);
    }

    #[test]
    fn test_missing_pe_column() {
        let df = table().drop("pe_ratio").unwrap();
        assert!(matches!(
            EarningsValueScorer::default().compute_scores(&df),
            Err(ScoreError::MissingColumn(_))
        ));
    }
}
