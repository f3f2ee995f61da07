//! Column-mean imputation of missing ratios.

use crate::error::{Result, ScoreError};
use polars::prelude::*;
use tracing::debug;

/// Replace every null in each of `columns` with that column's mean.
///
/// Columns are handled independently and the mean is taken over the values
/// present before imputation.
///
/// # Errors
///
/// [`ScoreError::EmptyTable`] when the table has no rows, and
/// [`ScoreError::EmptyColumn`] when a column has no values at all; no mean
/// exists to fill with in either case.
pub fn impute_column_means(table: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    if table.height() == 0 {
        return Err(ScoreError::EmptyTable);
    }

    for name in columns {
        let column = table
            .column(name)
            .map_err(|_| ScoreError::MissingColumn((*name).to_string()))?;
        let missing = column.null_count();
        if missing == table.height() {
            return Err(ScoreError::EmptyColumn {
                column: (*name).to_string(),
            });
        }
        if missing > 0 {
            debug!(column = *name, missing, "Imputing column mean");
        }
    }

    let filled: Vec<Expr> = columns
        .iter()
        .map(|name| col(*name).fill_null(col(*name).mean()))
        .collect();

    Ok(table.clone().lazy().with_columns(filled).collect()?)
}
