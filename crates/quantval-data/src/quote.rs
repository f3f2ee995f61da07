//! Raw quote and fundamentals record.

use serde::{Deserialize, Serialize};

/// Quote and fundamentals fields for one ticker, as returned by the provider.
///
/// Every numeric field is optional: providers omit fields for some issuers,
/// and a non-numeric value is treated the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Stock symbol
    pub symbol: String,
    /// Latest traded price
    pub latest_price: Option<f64>,
    /// Price to earnings ratio
    pub pe_ratio: Option<f64>,
    /// Price to book ratio
    pub price_to_book: Option<f64>,
    /// Price to sales ratio
    pub price_to_sales: Option<f64>,
    /// Enterprise value
    pub enterprise_value: Option<f64>,
    /// EBITDA (TTM)
    pub ebitda: Option<f64>,
    /// Gross profit (TTM)
    pub gross_profit: Option<f64>,
}

impl RawQuote {
    /// A quote for `symbol` with every field missing.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }
}
