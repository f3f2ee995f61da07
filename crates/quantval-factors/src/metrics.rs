//! Value ratios per ticker and the metric table.
//!
//! Three ratios come straight from the provider (P/E, P/B, P/S); two are
//! derived from enterprise value (EV/EBITDA, EV/GP). A missing operand makes
//! the derived ratio missing rather than failing the row.

use polars::prelude::*;
use quantval_data::RawQuote;
use serde::{Deserialize, Serialize};

/// Column holding the ticker symbol.
pub const SYMBOL: &str = "symbol";

/// Column holding the latest price.
pub const PRICE: &str = "price";

/// The five value ratios, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueMetric {
    /// Price to earnings
    PriceToEarnings,
    /// Price to book
    PriceToBook,
    /// Price to sales
    PriceToSales,
    /// Enterprise value to EBITDA
    EvToEbitda,
    /// Enterprise value to gross profit
    EvToGrossProfit,
}

impl ValueMetric {
    /// All metrics, in output order.
    pub const ALL: [Self; 5] = [
        Self::PriceToEarnings,
        Self::PriceToBook,
        Self::PriceToSales,
        Self::EvToEbitda,
        Self::EvToGrossProfit,
    ];

    /// Table column holding the raw ratio.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "pe_ratio",
            Self::PriceToBook => "pb_ratio",
            Self::PriceToSales => "ps_ratio",
            Self::EvToEbitda => "ev_ebitda",
            Self::EvToGrossProfit => "ev_gp",
        }
    }

    /// Table column holding the ratio's percentile rank.
    pub const fn percentile_column(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "pe_percentile",
            Self::PriceToBook => "pb_percentile",
            Self::PriceToSales => "ps_percentile",
            Self::EvToEbitda => "ev_ebitda_percentile",
            Self::EvToGrossProfit => "ev_gp_percentile",
        }
    }

    /// Human-readable label, as used in report headers.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "Price to Earnings",
            Self::PriceToBook => "Price to Book",
            Self::PriceToSales => "Price to Sales",
            Self::EvToEbitda => "EV/EBITDA",
            Self::EvToGrossProfit => "EV/GP",
        }
    }
}

/// One value per [`ValueMetric`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    /// Price to earnings
    pub pe_ratio: Option<f64>,
    /// Price to book
    pub pb_ratio: Option<f64>,
    /// Price to sales
    pub ps_ratio: Option<f64>,
    /// Enterprise value to EBITDA
    pub ev_ebitda: Option<f64>,
    /// Enterprise value to gross profit
    pub ev_gp: Option<f64>,
}

impl Ratios {
    /// Build from a per-metric lookup.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(ValueMetric) -> Option<f64>,
    {
        Self {
            pe_ratio: f(ValueMetric::PriceToEarnings),
            pb_ratio: f(ValueMetric::PriceToBook),
            ps_ratio: f(ValueMetric::PriceToSales),
            ev_ebitda: f(ValueMetric::EvToEbitda),
            ev_gp: f(ValueMetric::EvToGrossProfit),
        }
    }

    /// Value for one metric.
    pub const fn get(&self, metric: ValueMetric) -> Option<f64> {
        match metric {
            ValueMetric::PriceToEarnings => self.pe_ratio,
            ValueMetric::PriceToBook => self.pb_ratio,
            ValueMetric::PriceToSales => self.ps_ratio,
            ValueMetric::EvToEbitda => self.ev_ebitda,
            ValueMetric::EvToGrossProfit => self.ev_gp,
        }
    }
}

/// `numerator / denominator`, or `None` when either side is missing, the
/// denominator is zero, or the quotient is not finite.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d).filter(|q| q.is_finite()),
        _ => None,
    }
}

/// Price and raw ratios for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Stock symbol
    pub symbol: String,
    /// Latest price
    pub price: Option<f64>,
    /// The five value ratios
    pub ratios: Ratios,
}

impl MetricRow {
    /// Compute the row for one provider quote.
    pub fn from_quote(quote: &RawQuote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            price: quote.latest_price,
            ratios: Ratios {
                pe_ratio: quote.pe_ratio,
                pb_ratio: quote.price_to_book,
                ps_ratio: quote.price_to_sales,
                ev_ebitda: ratio(quote.enterprise_value, quote.ebitda),
                ev_gp: ratio(quote.enterprise_value, quote.gross_profit),
            },
        }
    }

    /// Whether the row has a strictly positive price.
    pub fn has_valid_price(&self) -> bool {
        self.price.is_some_and(|p| p.is_finite() && p > 0.0)
    }
}

/// Build the metric table from computed rows.
///
/// Every row is kept, priced or not, so that imputation and percentile ranks
/// see the whole universe. A non-finite price is stored as null. Columns:
/// `symbol`, `price`, then one column per [`ValueMetric`] in
/// [`ValueMetric::ALL`] order.
pub fn metric_table(rows: &[MetricRow]) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        Column::new(
            SYMBOL.into(),
            rows.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            PRICE.into(),
            rows.iter()
                .map(|r| r.price.filter(|p| p.is_finite()))
                .collect::<Vec<Option<f64>>>(),
        ),
    ];
    for metric in ValueMetric::ALL {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.ratios.get(metric)).collect();
        columns.push(Column::new(metric.column().into(), values));
    }

    DataFrame::new(columns)
}
