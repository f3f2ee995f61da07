//! The final screen report.

use crate::portfolio::Allocation;
use chrono::{DateTime, Utc};
use quantval_factors::{Candidate, ScoringMode};
use serde::{Deserialize, Serialize};

/// One candidate as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Stock symbol
    pub symbol: String,
    /// Latest price
    pub price: f64,
    /// Price to earnings
    pub pe_ratio: Option<f64>,
    /// Price to earnings percentile
    pub pe_percentile: Option<f64>,
    /// Price to book
    pub pb_ratio: Option<f64>,
    /// Price to book percentile
    pub pb_percentile: Option<f64>,
    /// Price to sales
    pub ps_ratio: Option<f64>,
    /// Price to sales percentile
    pub ps_percentile: Option<f64>,
    /// EV/EBITDA
    pub ev_ebitda: Option<f64>,
    /// EV/EBITDA percentile
    pub ev_ebitda_percentile: Option<f64>,
    /// EV/GP
    pub ev_gp: Option<f64>,
    /// EV/GP percentile
    pub ev_gp_percentile: Option<f64>,
    /// Composite score
    pub robust_score: Option<f64>,
    /// Whole shares to buy
    pub shares: Option<u64>,
}

impl ReportRow {
    /// Build a row from a candidate and, when positions were sized, its share count.
    pub fn new(candidate: &Candidate, shares: Option<u64>) -> Self {
        let ratios = &candidate.ratios;
        let pct = candidate.percentiles.unwrap_or_default();
        Self {
            symbol: candidate.symbol.clone(),
            price: candidate.price,
            pe_ratio: ratios.pe_ratio,
            pe_percentile: pct.pe_ratio,
            pb_ratio: ratios.pb_ratio,
            pb_percentile: pct.pb_ratio,
            ps_ratio: ratios.ps_ratio,
            ps_percentile: pct.ps_ratio,
            ev_ebitda: ratios.ev_ebitda,
            ev_ebitda_percentile: pct.ev_ebitda,
            ev_gp: ratios.ev_gp,
            ev_gp_percentile: pct.ev_gp,
            robust_score: candidate.robust_score,
            shares,
        }
    }
}

/// Ranked candidates with their suggested positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueReport {
    /// Strategy name; also the workbook sheet name
    pub strategy: String,
    /// Scoring mode the report was produced with
    pub mode: ScoringMode,
    /// Report generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Portfolio budget, when positions were sized
    pub budget: Option<f64>,
    /// Capital per position, when positions were sized
    pub position_size: Option<f64>,
    /// Candidates in rank order
    pub rows: Vec<ReportRow>,
}

impl ValueReport {
    /// Assemble a report from ranked candidates and an optional allocation.
    pub fn new(
        strategy: impl Into<String>,
        mode: ScoringMode,
        candidates: &[Candidate],
        allocation: Option<&Allocation>,
    ) -> Self {
        let rows = candidates
            .iter()
            .map(|c| ReportRow::new(c, allocation.and_then(|a| a.shares_for(&c.symbol))))
            .collect();

        Self {
            strategy: strategy.into(),
            mode,
            generated_at: Utc::now(),
            budget: allocation.map(|a| a.budget),
            position_size: allocation.map(|a| a.position_size),
            rows,
        }
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no candidates.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
