//! Report assembly and export through the public API.

use approx::assert_relative_eq;
use quantval_factors::{Candidate, Ratios, ScoringMode};
use quantval_output::{
    AllocationError, ExportFormat, Exporter, ValueReport, WorkbookLayout, allocate_equal_weight,
    write_workbook,
};

fn candidate(symbol: &str, price: f64, score: f64) -> Candidate {
    Candidate {
        symbol: symbol.to_string(),
        price,
        ratios: Ratios::from_fn(|_| Some(price / 2.0)),
        percentiles: Some(Ratios::from_fn(|_| Some(score))),
        robust_score: Some(score),
    }
}

#[test]
fn test_allocation_flows_into_report() {
    let candidates = vec![
        candidate("LOW", 10.0, 0.1),
        candidate("MID", 20.0, 0.5),
        candidate("HIGH", 50.0, 0.9),
    ];
    let allocation = allocate_equal_weight(&candidates, 300.0).unwrap();
    assert_relative_eq!(allocation.position_size, 100.0);
    assert_relative_eq!(allocation.total_allocated(), 300.0);

    let report = ValueReport::new(
        "Value Strategy",
        ScoringMode::CompositePercentile,
        &candidates,
        Some(&allocation),
    );
    let shares: Vec<_> = report.rows.iter().map(|r| r.shares).collect();
    assert_eq!(shares, vec![Some(10), Some(5), Some(2)]);
}

#[test]
fn test_zero_candidates_cannot_be_allocated() {
    let result = allocate_equal_weight(&[], 10_000.0);
    assert!(matches!(result, Err(AllocationError::NoCandidates { .. })));
}

#[test]
fn test_workbook_and_csv_written_side_by_side() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = vec![candidate("AAA", 25.0, 0.3), candidate("BBB", 40.0, 0.7)];
    let allocation = allocate_equal_weight(&candidates, 1_000.0).unwrap();
    let report = ValueReport::new(
        "Value Strategy",
        ScoringMode::CompositePercentile,
        &candidates,
        Some(&allocation),
    );

    let xlsx = dir
        .path()
        .join(WorkbookLayout::default_file_name(report.mode));
    write_workbook(&report, &xlsx).unwrap();
    assert!(xlsx.ends_with("value_strategy.xlsx"));
    assert!(std::fs::read(&xlsx).unwrap().starts_with(b"PK"));

    let csv_path = dir.path().join("value_strategy.csv");
    report.export_to_file(&csv_path, ExportFormat::Csv).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert_eq!(
        csv.lines().next().unwrap().split(',').count(),
        WorkbookLayout::robust().columns.len()
    );
}

#[test]
fn test_json_round_trips_report() {
    let candidates = vec![candidate("AAA", 25.0, 0.3)];
    let report = ValueReport::new("PE Value Strategy", ScoringMode::RawPe, &candidates, None);
    let json = report.export_to_string(ExportFormat::Json).unwrap();
    let parsed: ValueReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.rows, report.rows);
    assert_eq!(parsed.mode, ScoringMode::RawPe);
}
