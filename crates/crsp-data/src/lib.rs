#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/crsp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod coerce;
pub mod columns;
pub mod crsp;
pub mod error;
pub mod french;
mod reader;
pub mod universe;

pub use calendar::{YearMonth, parse_date};
pub use crsp::{load_bonds, load_riskless, load_stocks};
pub use error::{DataError, Result};
pub use french::{load_decile_benchmark, load_fama_french};
pub use universe::{Exchange, Universe, UniverseFilter};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
