//! Typed rows read back from a ranked table.

use crate::error::{Result, ScoreError};
use crate::metrics::{PRICE, Ratios, SYMBOL, ValueMetric};
use crate::value::ROBUST_SCORE;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A ranked ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stock symbol
    pub symbol: String,
    /// Latest price, always strictly positive
    pub price: f64,
    /// Value ratios (after imputation, when the scorer imputes)
    pub ratios: Ratios,
    /// Percentile rank of each ratio, when the scorer computes them
    pub percentiles: Option<Ratios>,
    /// Composite score, when the scorer computes one
    pub robust_score: Option<f64>,
}

fn float_column<'a>(table: &'a DataFrame, name: &str) -> Result<Option<&'a Float64Chunked>> {
    match table.column(name) {
        Ok(column) => Ok(Some(column.f64()?)),
        Err(_) => Ok(None),
    }
}

/// Read every row of a scored table, in table order.
///
/// `symbol` and `price` are required. Ratio, percentile and score columns are
/// read when present; percentiles are only reported when all five exist.
pub fn read_candidates(table: &DataFrame) -> Result<Vec<Candidate>> {
    let symbols = table
        .column(SYMBOL)
        .map_err(|_| ScoreError::MissingColumn(SYMBOL.to_string()))?
        .str()?;
    let prices =
        float_column(table, PRICE)?.ok_or_else(|| ScoreError::MissingColumn(PRICE.to_string()))?;

    let mut ratio_columns = Vec::with_capacity(ValueMetric::ALL.len());
    let mut percentile_columns = Vec::with_capacity(ValueMetric::ALL.len());
    for metric in ValueMetric::ALL {
        ratio_columns.push(float_column(table, metric.column())?);
        percentile_columns.push(float_column(table, metric.percentile_column())?);
    }
    let has_percentiles = percentile_columns.iter().all(Option::is_some);
    let scores = float_column(table, ROBUST_SCORE)?;

    let lookup = |columns: &[Option<&Float64Chunked>], metric: ValueMetric, row: usize| {
        let index = ValueMetric::ALL.iter().position(|m| *m == metric)?;
        columns[index]?.get(row)
    };

    (0..table.height())
        .map(|row| {
            let symbol = symbols
                .get(row)
                .ok_or_else(|| ScoreError::MissingValue {
                    column: SYMBOL.to_string(),
                    symbol: format!("row {row}"),
                })?
                .to_string();
            let price = prices.get(row).ok_or_else(|| ScoreError::MissingValue {
                column: PRICE.to_string(),
                symbol: symbol.clone(),
            })?;

            Ok(Candidate {
                ratios: Ratios::from_fn(|m| lookup(&ratio_columns, m, row)),
                percentiles: has_percentiles
                    .then(|| Ratios::from_fn(|m| lookup(&percentile_columns, m, row))),
                robust_score: scores.and_then(|s| s.get(row)),
                symbol,
                price,
            })
        })
        .collect()
}
