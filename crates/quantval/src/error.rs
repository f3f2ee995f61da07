//! Error type for a full screen run.

use quantval_data::DataError;
use quantval_factors::ScoreError;
use quantval_output::{AllocationError, ExportError};
use thiserror::Error;

/// Result type for screen runs.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Any failure that aborts a screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Loading tickers or fetching quotes failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Scoring or ranking failed
    #[error(transparent)]
    Score(#[from] ScoreError),

    /// Position sizing failed
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Writing the report failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The screen configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<polars::prelude::PolarsError> for ScreenError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Score(ScoreError::Polars(err))
    }
}
