//! Error types for portfolio constructions.

use crsp_data::DataError;
use crsp_stats::StatsError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type for portfolio constructions.
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Errors raised while building a portfolio series.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Polars failure while transforming a frame
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Error from the data layer
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Error from a statistical routine
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// The input frame lacks a column the construction needs
    #[error("{construction}: missing required column '{column}'")]
    MissingColumn {
        /// Column name
        column: String,
        /// Construction that requested it
        construction: String,
    },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
