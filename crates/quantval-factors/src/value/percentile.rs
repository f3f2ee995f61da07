//! Percentile-of-score ranking.
//!
//! The percentile of `x` within a column is the fraction of the column's
//! values that are `<= x`. Ties all receive the highest position they share,
//! so in `[10, 20, 20, 30]` both 20s score 0.75.

use polars::prelude::*;

/// Expression ranking `column` as a fraction in `(0, 1]`.
///
/// Null inputs rank as null and are excluded from the denominator.
pub fn percentile_rank(column: &str) -> Expr {
    let options = RankOptions {
        method: RankMethod::Max,
        descending: false,
    };
    col(column).rank(options, None).cast(DataType::Float64)
        / col(column).count().cast(DataType::Float64)
}

/// Percentile of `score` within `values`, as a fraction.
///
/// Returns `None` for an empty slice.
pub fn percentile_of_score(values: &[f64], score: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let at_or_below = values.iter().filter(|v| **v <= score).count();
    Some(at_or_below as f64 / values.len() as f64)
}
