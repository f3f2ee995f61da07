//! Console rendering of screen reports.

use crate::report::{ReportRow, ValueReport};
use std::fmt;

fn fmt_opt(value: Option<f64>, scale: f64, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v * scale))
        .unwrap_or_else(|| "-".to_string())
}

fn row_line(rank: usize, row: &ReportRow, with_scores: bool) -> String {
    let mut line = format!(
        "  {:>3}  {:<8} {:>10.2} {:>8}",
        rank,
        row.symbol,
        row.price,
        fmt_opt(row.pe_ratio, 1.0, 2)
    );
    if with_scores {
        line.push_str(&format!(
            " {:>8} {:>8} {:>10} {:>8} {:>7}%",
            fmt_opt(row.pb_ratio, 1.0, 2),
            fmt_opt(row.ps_ratio, 1.0, 2),
            fmt_opt(row.ev_ebitda, 1.0, 2),
            fmt_opt(row.ev_gp, 1.0, 2),
            fmt_opt(row.robust_score, 100.0, 1),
        ));
        if let Some(shares) = row.shares {
            line.push_str(&format!(" {:>8}", shares));
        }
    }
    line
}

/// Render a report as a fixed-width table, showing at most `max_rows` rows.
///
/// # Examples
///
/// ```
/// use quantval_factors::ScoringMode;
/// use quantval_output::{ValueReport, to_ascii_table};
///
/// let report = ValueReport::new("PE Value Strategy", ScoringMode::RawPe, &[], None);
/// let table = to_ascii_table(&report, 10);
/// assert!(table.contains("PE Value Strategy"));
/// ```
pub fn to_ascii_table(report: &ValueReport, max_rows: usize) -> String {
    let with_scores = report.mode.allocates();
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", report.strategy));
    output.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&"=".repeat(100));
    output.push('\n');

    if let (Some(budget), Some(position)) = (report.budget, report.position_size) {
        output.push_str(&format!("  Portfolio Value:          ${:.2}\n", budget));
        output.push_str(&format!("  Position Size:            ${:.2}\n", position));
    }
    output.push_str(&format!("  Candidates:               {}\n", report.len()));

    if report.is_empty() {
        return output;
    }

    output.push('\n');
    let mut header = format!("  {:>3}  {:<8} {:>10} {:>8}", "#", "Symbol", "Price", "P/E");
    if with_scores {
        header.push_str(&format!(
            " {:>8} {:>8} {:>10} {:>8} {:>8}",
            "P/B", "P/S", "EV/EBITDA", "EV/GP", "Score"
        ));
        if report.budget.is_some() {
            header.push_str(&format!(" {:>8}", "Shares"));
        }
    }
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for (i, row) in report.rows.iter().take(max_rows).enumerate() {
        output.push_str(&row_line(i + 1, row, with_scores));
        output.push('\n');
    }

    if report.len() > max_rows {
        output.push_str(&format!("  ... and {} more\n", report.len() - max_rows));
    }

    output
}

impl fmt::Display for ValueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} candidates)", self.strategy, self.len())?;
        if let Some(position) = self.position_size {
            writeln!(f, "  Position Size: ${:.2}", position)?;
        }
        Ok(())
    }
}
