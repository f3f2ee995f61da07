//! Equal-weight position sizing.
//!
//! The budget is split evenly across the selected candidates regardless of
//! score, and each position is rounded down to whole shares.

use quantval_factors::Candidate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while sizing positions.
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    /// Nothing survived selection, so there is nothing to split the budget over.
    #[error("No candidates to allocate a budget of {budget} across")]
    NoCandidates {
        /// Requested budget
        budget: f64,
    },

    /// Budget is not a finite, strictly positive amount.
    #[error("Invalid portfolio budget: {0}")]
    InvalidBudget(f64),

    /// A candidate's price cannot be divided into.
    #[error("Invalid price {price} for {symbol}")]
    NonPositivePrice {
        /// Stock symbol
        symbol: String,
        /// Offending price
        price: f64,
    },
}

/// Suggested position in one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    /// Stock symbol
    pub symbol: String,
    /// Price used for sizing
    pub price: f64,
    /// Capital assigned to the position
    pub allocation: f64,
    /// Whole shares affordable with the allocation
    pub shares: u64,
}

impl PositionSize {
    /// Capital actually spent on whole shares.
    pub fn invested(&self) -> f64 {
        self.shares as f64 * self.price
    }
}

/// Result of an equal-weight allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Total budget
    pub budget: f64,
    /// Capital per position (`budget / positions`)
    pub position_size: f64,
    /// One entry per candidate, in candidate order
    pub positions: Vec<PositionSize>,
}

impl Allocation {
    /// Total capital assigned across positions; equals the budget up to
    /// floating-point rounding.
    pub fn total_allocated(&self) -> f64 {
        self.positions.iter().map(|p| p.allocation).sum()
    }

    /// Total capital spent on whole shares.
    pub fn total_invested(&self) -> f64 {
        self.positions.iter().map(PositionSize::invested).sum()
    }

    /// Budget left over after rounding down to whole shares.
    pub fn uninvested(&self) -> f64 {
        self.budget - self.total_invested()
    }

    /// Shares for a symbol, if it is in the allocation.
    pub fn shares_for(&self, symbol: &str) -> Option<u64> {
        self.positions
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.shares)
    }
}

/// Split `budget` equally across `candidates`.
///
/// Each candidate gets `budget / k` and `floor(budget / k / price)` shares.
///
/// # Errors
///
/// Fails when there are no candidates, when the budget is not finite and
/// strictly positive, or when a candidate's price is not strictly positive.
pub fn allocate_equal_weight(
    candidates: &[Candidate],
    budget: f64,
) -> Result<Allocation, AllocationError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(AllocationError::InvalidBudget(budget));
    }
    if candidates.is_empty() {
        return Err(AllocationError::NoCandidates { budget });
    }

    let position_size = budget / candidates.len() as f64;
    let positions = candidates
        .iter()
        .map(|c| {
            if !c.price.is_finite() || c.price <= 0.0 {
                return Err(AllocationError::NonPositivePrice {
                    symbol: c.symbol.clone(),
                    price: c.price,
                });
            }
            Ok(PositionSize {
                symbol: c.symbol.clone(),
                price: c.price,
                allocation: position_size,
                shares: (position_size / c.price).floor() as u64,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        budget,
        positions = positions.len(),
        position_size,
        "Allocated equal-weight portfolio"
    );

    Ok(Allocation {
        budget,
        position_size,
        positions,
    })
}
