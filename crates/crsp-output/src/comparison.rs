//! Agreement between a replicated series and its published counterpart.

use crate::frame::f64_values;
use crate::sample::SampleWindow;
use crate::summary::{CRSP_MARKET_LABEL, FF_MARKET_LABEL, Result, market_excess};
use crsp_data::columns::french::MKT_RF;
use crsp_portfolios::columns::excess::STOCK_EXCESS_VW_RET;
use crsp_stats::{StatsError, correlation};
use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation and largest absolute gap between two month-aligned series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationComparison {
    /// Replicated series label.
    pub replicated: String,
    /// Benchmark series label.
    pub benchmark: String,
    /// Pearson correlation, rounded to 8 decimals.
    pub correlation: f64,
    /// `max |replicated - benchmark|` over the paired months.
    pub max_abs_difference: f64,
    /// Number of paired months.
    pub observations: usize,
}

impl ReplicationComparison {
    /// Compare two paired series.
    pub fn between(
        replicated: impl Into<String>,
        benchmark: impl Into<String>,
        x: &[f64],
        y: &[f64],
    ) -> Result<Self> {
        let corr = correlation(x, y)?;
        let max_abs_difference = x
            .iter()
            .zip(y)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        Ok(Self {
            replicated: replicated.into(),
            benchmark: benchmark.into(),
            correlation: (corr * 1e8).round() / 1e8,
            max_abs_difference,
            observations: x.len(),
        })
    }
}

impl fmt::Display for ReplicationComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {}", self.replicated, self.benchmark)?;
        writeln!(f, "  Correlation:             {:.8}", self.correlation)?;
        writeln!(f, "  Max absolute difference: {:.8}", self.max_abs_difference)?;
        write!(f, "  Months:                  {}", self.observations)
    }
}

/// Compare the CRSP value-weighted excess return with Fama-French `mkt_rf`.
pub fn market_comparison(
    monthly: &DataFrame,
    factors: &DataFrame,
    window: &SampleWindow,
) -> Result<ReplicationComparison> {
    let aligned = market_excess(monthly, factors, window)?;
    let crsp: Vec<f64> = f64_values(&aligned, STOCK_EXCESS_VW_RET)?
        .into_iter()
        .flatten()
        .collect();
    let ff: Vec<f64> = f64_values(&aligned, MKT_RF)?
        .into_iter()
        .flatten()
        .collect();
    if crsp.len() != ff.len() {
        return Err(StatsError::LengthMismatch {
            left: crsp.len(),
            right: ff.len(),
        }
        .into());
    }

    let comparison = ReplicationComparison::between(
        CRSP_MARKET_LABEL,
        FF_MARKET_LABEL,
        &crsp,
        &ff,
    )?;
    info!(
        "market replication: correlation {:.8}, max abs difference {:.6} over {} months",
        comparison.correlation, comparison.max_abs_difference, comparison.observations
    );
    Ok(comparison)
}
