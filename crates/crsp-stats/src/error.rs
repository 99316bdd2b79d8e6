//! Error types for statistical routines.

use thiserror::Error;

/// Result type for statistical routines.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur when computing statistics.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// Insufficient data for estimation
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Paired series of different lengths
    #[error("Length mismatch: {left} vs {right} observations")]
    LengthMismatch {
        /// Length of the first series
        left: usize,
        /// Length of the second series
        right: usize,
    },

    /// A moment ratio was requested for a constant series
    #[error("Series has zero variance")]
    ZeroVariance,

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
