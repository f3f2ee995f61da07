//! Robust Value scorer
//!
//! Blends the five value ratios into one score. Missing ratios are imputed
//! with their column mean, each ratio is turned into a percentile rank over
//! the whole table, and the robust score is the unweighted mean of the five
//! percentiles. Scores lie in `[0, 1]`; lower means cheaper across the board.

use super::impute::impute_column_means;
use super::percentile::percentile_rank;
use super::{ValueScorer, ensure_columns};
use crate::error::{Result, ScoreError};
use crate::metrics::{PRICE, SYMBOL, ValueMetric};
use polars::prelude::*;

/// Column holding the composite score.
pub const ROBUST_SCORE: &str = "robust_score";

const REQUIRED: [&str; 7] = [
    SYMBOL,
    PRICE,
    ValueMetric::PriceToEarnings.column(),
    ValueMetric::PriceToBook.column(),
    ValueMetric::PriceToSales.column(),
    ValueMetric::EvToEbitda.column(),
    ValueMetric::EvToGrossProfit.column(),
];

/// Mean percentile rank across P/E, P/B, P/S, EV/EBITDA and EV/GP.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobustValueScorer;

fn mean_of(columns: &[&str]) -> Expr {
    let sum = columns
        .iter()
        .fold(lit(0.0), |acc, name| acc + col(*name));
    sum / lit(columns.len() as f64)
}

impl ValueScorer for RobustValueScorer {
    fn name(&self) -> &str {
        "Value Strategy"
    }

    fn required_columns(&self) -> &[&str] {
        &REQUIRED
    }

    fn rank_column(&self) -> &str {
        ROBUST_SCORE
    }

    fn compute_scores(&self, table: &DataFrame) -> Result<DataFrame> {
        ensure_columns(table, self.required_columns())?;
        if table.height() == 0 {
            return Err(ScoreError::EmptyTable);
        }

        let ratio_columns: Vec<&str> = ValueMetric::ALL.iter().map(|m| m.column()).collect();
        let percentile_columns: Vec<&str> = ValueMetric::ALL
            .iter()
            .map(|m| m.percentile_column())
            .collect();

        // Step 1: Fill gaps with column means
        let imputed = impute_column_means(table, &ratio_columns)?;

        // Step 2: Percentile rank of each ratio over the full table
        let percentiles: Vec<Expr> = ValueMetric::ALL
            .iter()
            .map(|m| percentile_rank(m.column()).alias(m.percentile_column()))
            .collect();

        // Step 3: Unweighted mean of the percentiles
        let scored = imputed
            .lazy()
            .with_columns(percentiles)
            .with_column(mean_of(&percentile_columns).alias(ROBUST_SCORE))
            .collect()?;

        Ok(scored)
    }
}
