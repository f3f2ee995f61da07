//! Ticker list ingestion.
//!
//! The ticker list is a CSV file with a `Ticker` header column. Other columns
//! are ignored, blank cells are skipped, symbols are upper-cased to match the
//! provider's keys and repeated symbols keep their first position.

use crate::error::{DataError, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Header of the column holding ticker symbols.
pub const TICKER_COLUMN: &str = "Ticker";

/// Read the ticker list from a CSV file.
pub fn read_tickers<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    read_tickers_from(file, &path.display().to_string())
}

/// Read the ticker list from any CSV reader.
///
/// This is the only place duplicates are removed; each one is logged.
/// `source_name` is only used in error messages.
pub fn read_tickers_from<R: Read>(reader: R, source_name: &str) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == TICKER_COLUMN)
        .ok_or_else(|| DataError::MissingColumn {
            column: TICKER_COLUMN.to_string(),
            source_name: source_name.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut tickers = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let Some(symbol) = record
            .get(column)
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase)
        else {
            continue;
        };
        if seen.insert(symbol.clone()) {
            tickers.push(symbol);
        } else {
            warn!(symbol = %symbol, "Duplicate ticker ignored");
        }
    }

    debug!(count = tickers.len(), source = source_name, "Loaded tickers");
    Ok(tickers)
}
