//! The screen pipeline.
//!
//! Quotes become a metric table, the table is scored by the configured
//! scorer, the best `top_n` rows are kept and, in composite mode, the budget
//! is split evenly across them. Everything after the fetch is pure.

use crate::config::ScreenConfig;
use crate::error::Result;
use quantval_data::{BatchProgress, QuoteProvider, RawQuote, fetch_universe};
use quantval_factors::{
    Candidate, MetricRow, ScoringMode, drop_unpriced, metric_table, read_candidates, select_top,
};
use quantval_output::{Allocation, ValueReport, allocate_equal_weight};
use tracing::{info, warn};

/// Ranked candidates from one scoring pass.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Strategy name of the scorer that produced the ranking
    pub strategy: String,
    /// Priced rows that survived the scorer's filter
    pub scored: usize,
    /// Selected candidates, best first
    pub candidates: Vec<Candidate>,
}

/// Counts gathered along the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenStats {
    /// Symbols requested from the provider
    pub universe: usize,
    /// Quotes carrying a usable price
    pub fetched: usize,
    /// Priced rows that survived the scorer's filter
    pub scored: usize,
    /// Candidates kept after ranking
    pub selected: usize,
}

/// Everything a finished screen produced.
#[derive(Debug, Clone)]
pub struct ScreenOutcome {
    /// The report to write
    pub report: ValueReport,
    /// Position sizes, in composite mode
    pub allocation: Option<Allocation>,
    /// Pipeline counts
    pub stats: ScreenStats,
}

/// Score quotes with the scorer for `mode` and keep the best `top_n`.
///
/// Every quote takes part in imputation and percentile ranking. Quotes
/// without a usable price are removed only afterwards, so they are never
/// selected. When no quote has a usable price, scoring is skipped and the
/// ranking is empty.
///
/// # Errors
///
/// Fails if the scorer fails, e.g. when a ratio column has no values at all.
pub fn rank_quotes(quotes: &[RawQuote], mode: ScoringMode, top_n: usize) -> Result<Ranking> {
    let scorer = mode.scorer();
    let rows: Vec<MetricRow> = quotes.iter().map(MetricRow::from_quote).collect();

    if !rows.iter().any(MetricRow::has_valid_price) {
        warn!(quotes = quotes.len(), "No quotes with a usable price");
        return Ok(Ranking {
            strategy: scorer.name().to_string(),
            scored: 0,
            candidates: Vec::new(),
        });
    }

    let table = metric_table(&rows)?;
    let scored = scorer.compute_scores(&table)?;
    let eligible = drop_unpriced(&scored)?;
    let top = select_top(&eligible, scorer.rank_column(), top_n)?;
    let candidates = read_candidates(&top)?;

    info!(
        strategy = scorer.name(),
        quotes = table.height(),
        scored = scored.height(),
        eligible = eligible.height(),
        selected = candidates.len(),
        "Ranked universe"
    );

    Ok(Ranking {
        strategy: scorer.name().to_string(),
        scored: eligible.height(),
        candidates,
    })
}

/// Size positions, when the mode calls for it, and assemble the report.
///
/// # Errors
///
/// In composite mode, fails when there are no candidates or the budget is
/// not a finite positive amount.
pub fn build_report(
    ranking: &Ranking,
    mode: ScoringMode,
    budget: Option<f64>,
) -> Result<(ValueReport, Option<Allocation>)> {
    let allocation = match (mode.allocates(), budget) {
        (true, Some(budget)) => Some(allocate_equal_weight(&ranking.candidates, budget)?),
        _ => None,
    };
    let report = ValueReport::new(
        ranking.strategy.as_str(),
        mode,
        &ranking.candidates,
        allocation.as_ref(),
    );
    Ok((report, allocation))
}

/// Run a complete screen over `symbols`.
///
/// `on_batch` is called after every provider batch.
///
/// # Errors
///
/// Fails on an invalid configuration, on the first provider error, or on
/// any scoring or sizing error.
pub async fn run_screen<P, F>(
    provider: &P,
    symbols: &[String],
    config: &ScreenConfig,
    budget: Option<f64>,
    on_batch: F,
) -> Result<ScreenOutcome>
where
    P: QuoteProvider,
    F: FnMut(BatchProgress),
{
    config.validate()?;

    let quotes = fetch_universe(provider, symbols, config.batch_size, on_batch).await?;
    let fetched = quotes
        .iter()
        .filter(|q| q.latest_price.is_some_and(|p| p.is_finite() && p > 0.0))
        .count();

    let ranking = rank_quotes(&quotes, config.mode, config.top_n)?;
    let (report, allocation) = build_report(&ranking, config.mode, budget)?;

    let stats = ScreenStats {
        universe: symbols.len(),
        fetched,
        scored: ranking.scored,
        selected: ranking.candidates.len(),
    };
    info!(?stats, "Screen complete");

    Ok(ScreenOutcome {
        report,
        allocation,
        stats,
    })
}
