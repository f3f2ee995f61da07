#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantval/quantval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod candidate;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod registry;
pub mod value;

pub use candidate::{Candidate, read_candidates};
pub use error::{Result, ScoreError};
pub use metrics::{MetricRow, Ratios, ValueMetric, metric_table, ratio};
pub use ranking::{DEFAULT_TOP_N, drop_unpriced, select_top};
pub use registry::{MetricInfo, MetricSource, available_metrics, get_metric_info};
pub use value::{EarningsValueScorer, RobustValueScorer, ScoringMode, ValueScorer};
