//! Integration tests for metric computation, scoring and ranking.

use approx::assert_relative_eq;
use quantval_data::RawQuote;
use quantval_factors::{
    DEFAULT_TOP_N, MetricRow, RobustValueScorer, ScoreError, ScoringMode, ValueScorer,
    drop_unpriced, metric_table, read_candidates, select_top,
};

/// Deterministic quotes with some gaps, spread over `n` tickers.
fn quotes(n: usize) -> Vec<RawQuote> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            RawQuote {
                symbol: format!("T{i:03}"),
                latest_price: Some(5.0 + (i % 17) as f64 * 3.0),
                pe_ratio: Some(((i * 37) % 53) as f64 - 5.0),
                price_to_book: (i % 7 != 0).then(|| 0.5 + ((i * 11) % 13) as f64),
                price_to_sales: Some(0.2 + ((i * 5) % 9) as f64),
                enterprise_value: Some(1_000.0 + x * 10.0),
                ebitda: (i % 5 != 0).then(|| 50.0 + ((i * 3) % 29) as f64),
                gross_profit: Some(200.0 + ((i * 7) % 31) as f64),
            }
        })
        .collect()
}

fn rows(n: usize) -> Vec<MetricRow> {
    quotes(n).iter().map(MetricRow::from_quote).collect()
}

#[test]
fn test_composite_scores_bounded() {
    let table = metric_table(&rows(120)).unwrap();
    let scored = RobustValueScorer.compute_scores(&table).unwrap();

    for candidate in read_candidates(&scored).unwrap() {
        let score = candidate.robust_score.unwrap();
        assert!((0.0..=1.0).contains(&score), "{score}");

        let percentiles = candidate.percentiles.unwrap();
        let mean = [
            percentiles.pe_ratio,
            percentiles.pb_ratio,
            percentiles.ps_ratio,
            percentiles.ev_ebitda,
            percentiles.ev_gp,
        ]
        .iter()
        .map(|p| p.unwrap())
        .sum::<f64>()
            / 5.0;
        assert_relative_eq!(score, mean, epsilon = 1e-12);
    }
}

#[test]
fn test_imputation_leaves_no_gaps() {
    let table = metric_table(&rows(40)).unwrap();
    assert!(table.column("pb_ratio").unwrap().null_count() > 0);
    assert!(table.column("ev_ebitda").unwrap().null_count() > 0);

    let scored = RobustValueScorer.compute_scores(&table).unwrap();
    for column in ["pe_ratio", "pb_ratio", "ps_ratio", "ev_ebitda", "ev_gp"] {
        assert_eq!(scored.column(column).unwrap().null_count(), 0, "{column}");
    }
}

#[test]
fn test_top_n_selection() {
    let table = metric_table(&rows(120)).unwrap();
    let scorer = ScoringMode::CompositePercentile.scorer();
    let scored = scorer.compute_scores(&table).unwrap();
    let top = select_top(&scored, scorer.rank_column(), DEFAULT_TOP_N).unwrap();

    assert_eq!(top.height(), DEFAULT_TOP_N);

    let candidates = read_candidates(&top).unwrap();
    let scores: Vec<f64> = candidates.iter().map(|c| c.robust_score.unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));

    // Nothing outside the selection scores strictly lower than its worst member
    let cutoff = *scores.last().unwrap();
    let all = read_candidates(&scored).unwrap();
    let below = all
        .iter()
        .filter(|c| c.robust_score.unwrap() < cutoff)
        .count();
    assert!(below <= DEFAULT_TOP_N);
}

#[test]
fn test_small_universe_keeps_everything() {
    let table = metric_table(&rows(12)).unwrap();
    let scored = RobustValueScorer.compute_scores(&table).unwrap();
    let top = select_top(&scored, "robust_score", DEFAULT_TOP_N).unwrap();
    assert_eq!(top.height(), 12);
}

#[test]
fn test_raw_pe_mode() {
    let table = metric_table(&rows(60)).unwrap();
    let scorer = ScoringMode::RawPe.scorer();
    let scored = scorer.compute_scores(&table).unwrap();
    let top = select_top(&scored, scorer.rank_column(), 10).unwrap();

    let candidates = read_candidates(&top).unwrap();
    assert_eq!(candidates.len(), 10);
    let pes: Vec<f64> = candidates.iter().map(|c| c.ratios.pe_ratio.unwrap()).collect();
    assert!(pes.iter().all(|pe| *pe > 0.0));
    assert!(pes.windows(2).all(|w| w[0] <= w[1]));
    assert!(candidates.iter().all(|c| c.robust_score.is_none()));
}

#[test]
fn test_unpriced_rows_scored_but_never_selected() {
    let mut quotes = quotes(30);
    for quote in quotes.iter_mut().step_by(3) {
        quote.latest_price = None;
    }
    let rows: Vec<MetricRow> = quotes.iter().map(MetricRow::from_quote).collect();
    let table = metric_table(&rows).unwrap();
    assert_eq!(table.height(), 30);

    let scored = RobustValueScorer.compute_scores(&table).unwrap();
    assert_eq!(scored.height(), 30);

    let eligible = drop_unpriced(&scored).unwrap();
    let top = select_top(&eligible, "robust_score", DEFAULT_TOP_N).unwrap();
    let candidates = read_candidates(&top).unwrap();
    assert_eq!(candidates.len(), 20);
    assert!(candidates.iter().all(|c| c.price > 0.0));
}

#[test]
fn test_empty_table() {
    let table = metric_table(&[]).unwrap();
    assert!(matches!(
        RobustValueScorer.compute_scores(&table),
        Err(ScoreError::EmptyTable)
    ));
}
