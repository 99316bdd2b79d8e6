#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/crsp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod comparison;
pub mod export;
mod frame;
pub mod report;
pub mod sample;
pub mod summary;

pub use comparison::{ReplicationComparison, market_comparison};
pub use export::{ExportError, ExportFormat, Exporter, FrameExport};
pub use report::{ReportError, RunReport, RunReportBuilder};
pub use sample::SampleWindow;
pub use summary::{
    BreakpointPolicy, CRSP_MARKET_LABEL, FF_MARKET_LABEL, PerformanceStats, PerformanceTable,
    RISK_PARITY_SERIES, SummaryError, WML_LABEL, market_excess, market_table, momentum_table,
    risk_parity_table,
};
