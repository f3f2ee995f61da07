#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantval/quantval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod iex;
pub mod provider;
pub mod quote;
pub mod tickers;

pub use error::{DataError, Result};
pub use provider::{BatchProgress, DEFAULT_BATCH_SIZE, QuoteProvider, batches, fetch_universe};
pub use quote::RawQuote;
pub use tickers::{TICKER_COLUMN, read_tickers, read_tickers_from};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
