#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/crsp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export main types from sub-crates
pub use crsp_data as data;
pub use crsp_output as output;
pub use crsp_portfolios as portfolios;
pub use crsp_stats as stats;

pub use config::{PipelineConfig, SampleConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{
    MarketRun, MomentumRun, RiskParityRun, run_market, run_momentum, run_risk_parity,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
