//! Styled `.xlsx` output.
//!
//! One sheet named for the strategy, a fixed set of columns, each with a
//! fixed number format and width. Every cell shares the same dark fill and
//! thin border; missing values are written as styled blanks.

use crate::report::{ReportRow, ValueReport};
use quantval_factors::ScoringMode;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::Path;

/// Default workbook for the composite strategy.
pub const ROBUST_WORKBOOK: &str = "value_strategy.xlsx";

/// Default workbook for the raw P/E strategy.
pub const EARNINGS_WORKBOOK: &str = "pe_value_strategy.xlsx";

/// Width applied to every column.
pub const COLUMN_WIDTH: f64 = 25.0;

const BACKGROUND: u32 = 0x0A_0A_23;

/// Display format of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// Plain text
    Text,
    /// Dollar amount with cents
    Currency,
    /// Number with two decimals
    Decimal,
    /// Fraction shown as a percentage
    Percentage,
    /// Whole number
    Integer,
}

impl ColumnFormat {
    /// Excel number format string.
    pub const fn num_format(&self) -> &'static str {
        match self {
            Self::Text => "@",
            Self::Currency => "$0.00",
            Self::Decimal => "0.00",
            Self::Percentage => "0.0%",
            Self::Integer => "0",
        }
    }

    fn cell_format(&self) -> Format {
        Format::new()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(BACKGROUND))
            .set_border(FormatBorder::Thin)
            .set_num_format(self.num_format())
    }
}

/// A cell value extracted from a report row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Missing value
    Empty,
}

impl Cell {
    fn number(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }

    /// Plain-text rendering, as used for CSV.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(v) => v.to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// One output column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Header text
    pub header: &'static str,
    /// Display format
    pub format: ColumnFormat,
    value: fn(&ReportRow) -> Cell,
}

impl ColumnSpec {
    const fn new(header: &'static str, format: ColumnFormat, value: fn(&ReportRow) -> Cell) -> Self {
        Self {
            header,
            format,
            value,
        }
    }

    /// Extract this column's cell from a row.
    pub fn cell(&self, row: &ReportRow) -> Cell {
        (self.value)(row)
    }
}

/// Ordered columns of a report sheet.
#[derive(Debug, Clone)]
pub struct WorkbookLayout {
    /// Columns in output order
    pub columns: Vec<ColumnSpec>,
}

impl WorkbookLayout {
    /// The 14-column composite strategy layout.
    pub fn robust() -> Self {
        use ColumnFormat::{Currency, Decimal, Integer, Percentage, Text};
        Self {
            columns: vec![
                ColumnSpec::new("Stock", Text, |r| Cell::Text(r.symbol.clone())),
                ColumnSpec::new("Price", Currency, |r| Cell::Number(r.price)),
                ColumnSpec::new("Price to Earnings", Decimal, |r| Cell::number(r.pe_ratio)),
                ColumnSpec::new("Price to Earnings Percentile", Percentage, |r| {
                    Cell::number(r.pe_percentile)
                }),
                ColumnSpec::new("Price to Book", Decimal, |r| Cell::number(r.pb_ratio)),
                ColumnSpec::new("Price to Book Percentile", Percentage, |r| {
                    Cell::number(r.pb_percentile)
                }),
                ColumnSpec::new("Price to Sales", Decimal, |r| Cell::number(r.ps_ratio)),
                ColumnSpec::new("Price to Sales Percentile", Percentage, |r| {
                    Cell::number(r.ps_percentile)
                }),
                ColumnSpec::new("EV/EBITDA", Decimal, |r| Cell::number(r.ev_ebitda)),
                ColumnSpec::new("EV/EBITDA Percentile", Percentage, |r| {
                    Cell::number(r.ev_ebitda_percentile)
                }),
                ColumnSpec::new("EV/GP", Decimal, |r| Cell::number(r.ev_gp)),
                ColumnSpec::new("EV/GP Percentile", Percentage, |r| {
                    Cell::number(r.ev_gp_percentile)
                }),
                ColumnSpec::new("Robust Score", Percentage, |r| Cell::number(r.robust_score)),
                ColumnSpec::new("Number of Shares to Buy", Integer, |r| {
                    Cell::number(r.shares.map(|s| s as f64))
                }),
            ],
        }
    }

    /// The 3-column raw P/E layout.
    pub fn earnings() -> Self {
        Self {
            columns: vec![
                ColumnSpec::new("Stock", ColumnFormat::Text, |r| Cell::Text(r.symbol.clone())),
                ColumnSpec::new("Price", ColumnFormat::Currency, |r| Cell::Number(r.price)),
                ColumnSpec::new("Price to Earnings", ColumnFormat::Decimal, |r| {
                    Cell::number(r.pe_ratio)
                }),
            ],
        }
    }

    /// Layout for a scoring mode.
    pub fn for_mode(mode: ScoringMode) -> Self {
        match mode {
            ScoringMode::RawPe => Self::earnings(),
            ScoringMode::CompositePercentile => Self::robust(),
        }
    }

    /// Header texts in order.
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    /// Default file name for a scoring mode.
    pub const fn default_file_name(mode: ScoringMode) -> &'static str {
        match mode {
            ScoringMode::RawPe => EARNINGS_WORKBOOK,
            ScoringMode::CompositePercentile => ROBUST_WORKBOOK,
        }
    }
}

/// Build the workbook for a report.
pub fn build_workbook(report: &ValueReport) -> Result<Workbook, XlsxError> {
    let layout = WorkbookLayout::for_mode(report.mode);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&report.strategy)?;

    let header_format = ColumnFormat::Text.cell_format().set_bold();
    let formats: Vec<Format> = layout.columns.iter().map(|c| c.format.cell_format()).collect();

    for (col, (spec, format)) in layout.columns.iter().zip(&formats).enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
        sheet.write_string_with_format(0, col, spec.header, &header_format)?;

        for (index, row) in report.rows.iter().enumerate() {
            let xl_row = index as u32 + 1;
            match spec.cell(row) {
                Cell::Text(text) => sheet.write_string_with_format(xl_row, col, text, format)?,
                Cell::Number(value) => sheet.write_number_with_format(xl_row, col, value, format)?,
                Cell::Empty => sheet.write_blank(xl_row, col, format)?,
            };
        }
    }

    Ok(workbook)
}

/// Write a report to an `.xlsx` file.
pub fn write_workbook<P: AsRef<Path>>(report: &ValueReport, path: P) -> Result<(), XlsxError> {
    build_workbook(report)?.save(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRow;
    use chrono::Utc;

    fn row(symbol: &str) -> ReportRow {
        ReportRow {
            symbol: symbol.to_string(),
            price: 12.5,
            pe_ratio: Some(9.0),
            pe_percentile: Some(0.25),
            pb_ratio: None,
            pb_percentile: Some(0.5),
            ps_ratio: Some(1.1),
            ps_percentile: Some(0.75),
            ev_ebitda: Some(6.0),
            ev_ebitda_percentile: Some(0.25),
            ev_gp: Some(2.0),
            ev_gp_percentile: Some(1.0),
            robust_score: Some(0.55),
            shares: Some(80),
        }
    }

    fn report(mode: ScoringMode, strategy: &str) -> ValueReport {
        ValueReport {
            strategy: strategy.to_string(),
            mode,
            generated_at: Utc::now(),
            budget: Some(1_000.0),
            position_size: Some(1_000.0),
            rows: vec![row("AAA"), row("BBB")],
        }
    }

    #[test]
    fn test_robust_layout_headers() {
        assert_eq!(
            WorkbookLayout::robust().headers(),
            vec![
                "Stock",
                "Price",
                "Price to Earnings",
                "Price to Earnings Percentile",
                "Price to Book",
                "Price to Book Percentile",
                "Price to Sales",
                "Price to Sales Percentile",
                "EV/EBITDA",
                "EV/EBITDA Percentile",
                "EV/GP",
                "EV/GP Percentile",
                "Robust Score",
                "Number of Shares to Buy",
            ]
        );
    }

    #[test]
    fn test_robust_layout_formats() {
        let formats: Vec<ColumnFormat> = WorkbookLayout::robust()
            .columns
            .iter()
            .map(|c| c.format)
            .collect();
        assert_eq!(formats[0], ColumnFormat::Text);
        assert_eq!(formats[1], ColumnFormat::Currency);
        assert_eq!(formats[2], ColumnFormat::Decimal);
        assert_eq!(formats[3], ColumnFormat::Percentage);
        assert_eq!(formats[12], ColumnFormat::Percentage);
        assert_eq!(formats[13], ColumnFormat::Integer);
    }

    #[test]
    fn test_cells() {
        let layout = WorkbookLayout::robust();
        let row = row("AAA");
        assert_eq!(layout.columns[0].cell(&row), Cell::Text("AAA".to_string()));
        assert_eq!(layout.columns[1].cell(&row), Cell::Number(12.5));
        assert_eq!(layout.columns[4].cell(&row), Cell::Empty);
        assert_eq!(layout.columns[13].cell(&row), Cell::Number(80.0));
    }

    #[test]
    fn test_earnings_layout() {
        assert_eq!(
            WorkbookLayout::for_mode(ScoringMode::RawPe).headers(),
            vec!["Stock", "Price", "Price to Earnings"]
        );
        assert_eq!(
            WorkbookLayout::default_file_name(ScoringMode::RawPe),
            "pe_value_strategy.xlsx"
        );
        assert_eq!(
            WorkbookLayout::default_file_name(ScoringMode::CompositePercentile),
            "value_strategy.xlsx"
        );
    }

    #[test]
    fn test_build_workbook_to_buffer() {
        let mut workbook =
            build_workbook(&report(ScoringMode::CompositePercentile, "Value Strategy")).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        // xlsx is a zip archive
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = build_workbook(&report(ScoringMode::RawPe, "P/E [bad]"));
        assert!(result.is_err());
    }

    #[test]
    fn test_write_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ROBUST_WORKBOOK);
        write_workbook(&report(ScoringMode::CompositePercentile, "Value Strategy"), &path)
            .unwrap();
        assert!(path.exists());
    }
}
