//! The [`Construction`] trait shared by single-input portfolio builders.

use crate::error::{PortfolioError, Result};
use polars::prelude::DataFrame;

/// A portfolio construction that maps one input frame to a monthly series.
pub trait Construction {
    /// Unique name, matching the registry entry.
    fn name(&self) -> &str;

    /// Columns the input frame must carry.
    fn required_columns(&self) -> &[&str];

    /// Build the output frame.
    fn build(&self, data: &DataFrame) -> Result<DataFrame>;
}

/// Check that `data` carries every column in `required`.
pub fn validate_columns(data: &DataFrame, required: &[&str], construction: &str) -> Result<()> {
    match required.iter().find(|c| data.column(c).is_err()) {
        Some(missing) => Err(PortfolioError::MissingColumn {
            column: (*missing).to_string(),
            construction: construction.to_string(),
        }),
        None => Ok(()),
    }
}
