//! Decoding of the IEX Cloud `stock/market/batch` response.
//!
//! The payload maps each symbol to an object with a `quote` and an
//! `advanced-stats` section. Any field may be absent, `null` or of an
//! unexpected type; all of those decode to `None`.

use crate::error::{DataError, Result};
use crate::quote::RawQuote;
use serde_json::Value;
use std::collections::HashMap;

/// Section holding the price and P/E ratio.
pub const QUOTE_SECTION: &str = "quote";

/// Section holding the fundamentals.
pub const STATS_SECTION: &str = "advanced-stats";

/// Comma-joined `types` selector sent with each batch request.
pub const BATCH_TYPES: &str = "quote,advanced-stats";

fn number(section: Option<&Value>, field: &str) -> Option<f64> {
    section?
        .get(field)?
        .as_f64()
        .filter(|v| v.is_finite())
}

/// Decode one symbol's entry.
pub fn parse_symbol_entry(symbol: &str, entry: &Value) -> RawQuote {
    let quote = entry.get(QUOTE_SECTION);
    let stats = entry.get(STATS_SECTION);

    RawQuote {
        symbol: symbol.to_string(),
        latest_price: number(quote, "latestPrice"),
        pe_ratio: number(quote, "peRatio"),
        price_to_book: number(stats, "priceToBook"),
        price_to_sales: number(stats, "priceToSales"),
        enterprise_value: number(stats, "enterpriseValue"),
        ebitda: number(stats, "EBITDA"),
        gross_profit: number(stats, "grossProfit"),
    }
}

/// Decode a full batch response body.
///
/// # Errors
///
/// Fails only when the top level is not a JSON object.
pub fn parse_batch_response(body: &Value) -> Result<HashMap<String, RawQuote>> {
    let entries = body.as_object().ok_or_else(|| {
        DataError::Parse("batch response is not a JSON object keyed by symbol".to_string())
    })?;

    Ok(entries
        .iter()
        .map(|(symbol, entry)| (symbol.clone(), parse_symbol_entry(symbol, entry)))
        .collect())
}
