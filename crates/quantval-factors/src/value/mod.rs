//! Value scorers - rank tickers by relative cheapness.
//!
//! A scorer takes the metric table and returns it with the columns it adds
//! and the rows it keeps. The result is ranked ascending on
//! [`ValueScorer::rank_column`]: lower is cheaper.

pub mod earnings;
pub mod impute;
pub mod percentile;
pub mod robust;

pub use earnings::{EarningsValueConfig, EarningsValueScorer};
pub use impute::impute_column_means;
pub use percentile::{percentile_of_score, percentile_rank};
pub use robust::{ROBUST_SCORE, RobustValueScorer};

use crate::error::{Result, ScoreError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A value scoring strategy over the metric table.
pub trait ValueScorer {
    /// Strategy name, used as the report sheet title.
    fn name(&self) -> &str;

    /// Columns the input table must carry.
    fn required_columns(&self) -> &[&str];

    /// Column the scored table is ranked on, ascending.
    fn rank_column(&self) -> &str;

    /// Score the table.
    fn compute_scores(&self, table: &DataFrame) -> Result<DataFrame>;
}

/// Which scorer a screen runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Positive P/E only, ranked on raw P/E; no percentile blending and no
    /// position sizing.
    RawPe,
    /// Mean percentile rank across all five ratios.
    #[default]
    CompositePercentile,
}

impl ScoringMode {
    /// The scorer for this mode.
    pub fn scorer(&self) -> Box<dyn ValueScorer> {
        match self {
            Self::RawPe => Box::new(EarningsValueScorer::default()),
            Self::CompositePercentile => Box::new(RobustValueScorer),
        }
    }

    /// Whether this mode sizes positions against a portfolio budget.
    pub const fn allocates(&self) -> bool {
        matches!(self, Self::CompositePercentile)
    }
}

/// Fail with [`ScoreError::MissingColumn`] unless every column is present.
pub(crate) fn ensure_columns(table: &DataFrame, columns: &[&str]) -> Result<()> {
    match columns
        .iter()
        .find(|c| table.get_column_index(c).is_none())
    {
        Some(missing) => Err(ScoreError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}
