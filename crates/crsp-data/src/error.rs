//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or validating input files.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required column is absent from the input header
    #[error("Missing column `{column}` in {source_name}")]
    MissingColumn {
        /// Column that was expected
        column: String,
        /// File or frame the column was expected in
        source_name: String,
    },

    /// Unparseable date value
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Unparseable year-month key
    #[error("Invalid year-month: {0}")]
    InvalidYearMonth(String),

    /// Invalid month range
    #[error("Invalid month range: start {start} is after end {end}")]
    InvalidRange {
        /// Start of the range
        start: String,
        /// End of the range
        end: String,
    },

    /// File parsed but contained no usable rows
    #[error("No data rows in {0}")]
    Empty(String),

    /// Structural problem with an input file
    #[error("Data parsing error: {0}")]
    Parse(String),
}
