#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantval/quantval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod screen;
pub mod universe;

// Re-export main types from sub-crates
pub use quantval_data as data;
pub use quantval_factors as factors;
pub use quantval_output as output;

pub use config::ScreenConfig;
pub use error::{Result, ScreenError};
pub use screen::{Ranking, ScreenOutcome, ScreenStats, build_report, rank_quotes, run_screen};
pub use universe::{TickerUniverse, Universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
