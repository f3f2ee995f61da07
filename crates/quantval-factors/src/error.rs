//! Error types for scoring operations.

use thiserror::Error;

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Errors that can occur while scoring and ranking the metric table.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// The table has no rows to score
    #[error("Cannot score an empty table")]
    EmptyTable,

    /// Every value in a column is missing, so no mean exists to impute with
    #[error("Column {column} has no values to impute from")]
    EmptyColumn {
        /// Name of the column
        column: String,
    },

    /// A column the scorer needs is not in the table
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A required cell is null
    #[error("Missing {column} for {symbol}")]
    MissingValue {
        /// Name of the column
        column: String,
        /// Row identity
        symbol: String,
    },
}
