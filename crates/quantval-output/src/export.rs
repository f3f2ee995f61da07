//! Export functionality for screen reports.
//!
//! Reports go out as a styled workbook by default, or as CSV/JSON for
//! downstream tooling.

use crate::report::ValueReport;
use crate::workbook::{WorkbookLayout, build_workbook};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workbook error.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Styled Excel workbook.
    #[default]
    Xlsx,

    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Whether the format is text.
    pub const fn is_text(&self) -> bool {
        !matches!(self, Self::Xlsx)
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to bytes in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError>;

    /// Export data to a string in a text format.
    ///
    /// # Errors
    ///
    /// Returns an error for binary formats or if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        if !format.is_text() {
            return Err(ExportError::InvalidFormat(format!(
                "{} is not a text format",
                format.extension()
            )));
        }
        String::from_utf8(self.export_to_bytes(format)?)
            .map_err(|e| ExportError::InvalidFormat(e.to_string()))
    }

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_bytes(format)?;
        let mut file = File::create(path)?;
        file.write_all(&content)?;
        Ok(())
    }
}

impl ValueReport {
    fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let layout = WorkbookLayout::for_mode(self.mode);
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(layout.headers())?;
        for row in &self.rows {
            wtr.write_record(layout.columns.iter().map(|c| c.cell(row).to_text()))?;
        }
        wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}

impl Exporter for ValueReport {
    fn export_to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Xlsx => Ok(build_workbook(self)?.save_to_buffer()?),
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => Ok(serde_json::to_vec(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_vec_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::allocate_equal_weight;
    use quantval_factors::{Candidate, Ratios, ScoringMode};

    fn report(mode: ScoringMode) -> ValueReport {
        let candidates = vec![
            Candidate {
                symbol: "AAPL".to_string(),
                price: 150.0,
                ratios: Ratios::from_fn(|_| Some(12.0)),
                percentiles: Some(Ratios::from_fn(|_| Some(0.25))),
                robust_score: Some(0.25),
            },
            Candidate {
                symbol: "MSFT".to_string(),
                price: 300.0,
                ratios: Ratios::from_fn(|_| Some(30.0)),
                percentiles: Some(Ratios::from_fn(|_| Some(1.0))),
                robust_score: Some(1.0),
            },
        ];
        let allocation = mode
            .allocates()
            .then(|| allocate_equal_weight(&candidates, 3_000.0).unwrap());
        ValueReport::new("Value Strategy", mode, &candidates, allocation.as_ref())
    }

    #[test]
    fn test_export_csv() {
        let csv = report(ScoringMode::CompositePercentile)
            .export_to_string(ExportFormat::Csv)
            .unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Stock,Price,Price to Earnings,"));
        assert!(header.ends_with("Robust Score,Number of Shares to Buy"));
        assert_eq!(lines.next().unwrap().split(',').next_back(), Some("10"));
        assert_eq!(lines.next().unwrap().split(',').next_back(), Some("5"));
    }

    #[test]
    fn test_export_csv_raw_pe() {
        let csv = report(ScoringMode::RawPe)
            .export_to_string(ExportFormat::Csv)
            .unwrap();
        assert!(csv.starts_with("Stock,Price,Price to Earnings\n"));
        assert!(csv.contains("AAPL,150,12"));
    }

    #[test]
    fn test_export_json() {
        let json = report(ScoringMode::CompositePercentile)
            .export_to_string(ExportFormat::Json)
            .unwrap();
        assert!(json.contains("\"AAPL\""));
        assert!(json.contains("\"robust_score\""));
        assert!(json.contains("\"composite_percentile\""));

        let pretty = report(ScoringMode::CompositePercentile)
            .export_to_string(ExportFormat::PrettyJson)
            .unwrap();
        assert!(pretty.contains("  "));
    }

    #[test]
    fn test_xlsx_is_not_text() {
        let result = report(ScoringMode::RawPe).export_to_string(ExportFormat::Xlsx);
        assert!(matches!(result, Err(ExportError::InvalidFormat(_))));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = report(ScoringMode::CompositePercentile);

        for format in [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json] {
            let path = dir.path().join(format!("report.{}", format.extension()));
            report.export_to_file(&path, format).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
