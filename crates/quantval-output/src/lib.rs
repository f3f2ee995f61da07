#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantval/quantval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod portfolio;
pub mod report;
pub mod summary;
pub mod workbook;

pub use export::{ExportError, ExportFormat, Exporter};
pub use portfolio::{Allocation, AllocationError, PositionSize, allocate_equal_weight};
pub use report::{ReportRow, ValueReport};
pub use summary::to_ascii_table;
pub use workbook::{ColumnFormat, ColumnSpec, WorkbookLayout, write_workbook};
