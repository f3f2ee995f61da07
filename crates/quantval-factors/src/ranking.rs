//! Ranking and top-N selection.

use crate::error::{Result, ScoreError};
use crate::metrics::{PRICE, SYMBOL};
use polars::prelude::*;
use tracing::{debug, warn};

/// Default number of candidates kept after ranking.
pub const DEFAULT_TOP_N: usize = 50;

/// Remove rows whose price is missing or not above zero.
///
/// Scoring runs over the whole table first; this only narrows the rows that
/// may be selected, since price is the divisor when sizing positions.
pub fn drop_unpriced(table: &DataFrame) -> Result<DataFrame> {
    for column in [SYMBOL, PRICE] {
        if table.get_column_index(column).is_none() {
            return Err(ScoreError::MissingColumn(column.to_string()));
        }
    }

    let usable = col(PRICE).gt(lit(0.0)).fill_null(lit(false));
    let dropped = table.clone().lazy().filter(usable.clone().not()).collect()?;
    for symbol in dropped.column(SYMBOL)?.str()?.into_iter().flatten() {
        warn!(symbol, "Dropping ticker without a usable price");
    }

    Ok(table.clone().lazy().filter(usable).collect()?)
}

/// Sort `table` ascending on `column` and keep the first `top_n` rows.
///
/// The sort is stable, so rows with equal scores keep their prior relative
/// order. Rows with a null score are dropped. Never returns more rows than
/// the input has.
pub fn select_top(table: &DataFrame, column: &str, top_n: usize) -> Result<DataFrame> {
    if table.get_column_index(column).is_none() {
        return Err(ScoreError::MissingColumn(column.to_string()));
    }

    let sorted = table
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .sort(
            [column],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    let selected = sorted.head(Some(top_n));
    debug!(
        column,
        ranked = sorted.height(),
        selected = selected.height(),
        "Selected top candidates"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_drop_unpriced() {
        let df = df!(
            "symbol" => ["A", "B", "C", "D"],
            "price" => [Some(10.0), None, Some(0.0), Some(-5.0)],
            "score" => [0.9, 0.1, 0.2, 0.3]
        )
        .unwrap();

        let kept = drop_unpriced(&df).unwrap();
        assert_eq!(symbols(&kept), vec!["A"]);
    }

    #[test]
    fn test_drop_unpriced_needs_price() {
        let result = drop_unpriced(&table());
        assert!(matches!(result, Err(ScoreError::MissingColumn(c)) if c == "price"));
    }

    fn symbols(df: &DataFrame) -> Vec<String> {
        df.column("symbol")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect()
    }

    fn table() -> DataFrame {
        df!(
            "symbol" => ["A", "B", "C", "D", "E", "F"],
            "score" => [Some(0.5), Some(0.1), Some(0.5), None, Some(0.1), Some(0.9)]
        )
        .unwrap()
    }

    #[test]
    fn test_sorted_ascending_and_stable() {
        let top = select_top(&table(), "score", 10).unwrap();
        assert_eq!(symbols(&top), vec!["B", "E", "A", "C", "F"]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(5, 5)]
    #[case(50, 5)]
    fn test_truncation(#[case] top_n: usize, #[case] expected: usize) {
        let top = select_top(&table(), "score", top_n).unwrap();
        assert_eq!(top.height(), expected);
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            select_top(&table(), "nope", 5),
            Err(ScoreError::MissingColumn(_))
        ));
    }
}
