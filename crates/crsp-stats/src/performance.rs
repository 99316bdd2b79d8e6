//! Annualisation of monthly return series.

use crate::descriptive::{mean, std_dev};
use crate::error::{Result, StatsError};

/// Months per year.
pub const PERIODS_PER_YEAR: f64 = 12.0;

/// Annualised arithmetic mean, `mean × 12`.
pub fn annualized_mean(x: &[f64]) -> Result<f64> {
    Ok(mean(x)? * PERIODS_PER_YEAR)
}

/// Annualised volatility, `std(ddof = 1) × √12`.
pub fn annualized_volatility(x: &[f64]) -> Result<f64> {
    Ok(std_dev(x, 1)? * PERIODS_PER_YEAR.sqrt())
}

/// Annualised Sharpe ratio of an excess return series.
pub fn annualized_sharpe(x: &[f64]) -> Result<f64> {
    let vol = annualized_volatility(x)?;
    if vol == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    Ok(annualized_mean(x)? / vol)
}
