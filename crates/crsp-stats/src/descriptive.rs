//! Sample moments of a return series.
//!
//! Conventions follow the usual empirical-finance tooling: standard
//! deviations take an explicit `ddof`, skewness and kurtosis are the biased
//! (population) estimators, kurtosis is reported in excess of 3.

use crate::error::{Result, StatsError};
use ndarray::ArrayView1;

fn require(x: &[f64], required: usize) -> Result<()> {
    if x.len() < required {
        return Err(StatsError::InsufficientData {
            required,
            actual: x.len(),
        });
    }
    Ok(())
}

/// Arithmetic mean.
pub fn mean(x: &[f64]) -> Result<f64> {
    ArrayView1::from(x)
        .mean()
        .ok_or(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        })
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std_dev(x: &[f64], ddof: usize) -> Result<f64> {
    require(x, ddof + 1)?;
    Ok(ArrayView1::from(x).std(ddof as f64))
}

/// Treat a variance that is rounding noise relative to the mean as zero.
fn is_degenerate(var: f64, m: f64) -> bool {
    var <= f64::EPSILON * f64::EPSILON * m.abs().max(1.0).powi(2) * 16.0
}

/// `k`-th central moment, normalised by `n`.
fn central_moment(x: &[f64], m: f64, k: i32) -> f64 {
    ArrayView1::from(x)
        .mapv(|v| (v - m).powi(k))
        .mean()
        .unwrap_or(f64::NAN)
}

/// Population skewness `m3 / m2^1.5`.
pub fn skewness(x: &[f64]) -> Result<f64> {
    require(x, 2)?;
    let m = mean(x)?;
    let m2 = central_moment(x, m, 2);
    if is_degenerate(m2, m) {
        return Err(StatsError::ZeroVariance);
    }
    Ok(central_moment(x, m, 3) / m2.powf(1.5))
}

/// Population excess kurtosis `m4 / m2^2 - 3`.
pub fn excess_kurtosis(x: &[f64]) -> Result<f64> {
    require(x, 2)?;
    let m = mean(x)?;
    let m2 = central_moment(x, m, 2);
    if is_degenerate(m2, m) {
        return Err(StatsError::ZeroVariance);
    }
    Ok(central_moment(x, m, 4) / (m2 * m2) - 3.0)
}

/// Pearson correlation of two paired series.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    require(x, 2)?;

    let xv = ArrayView1::from(x);
    let yv = ArrayView1::from(y);
    let mx = mean(x)?;
    let my = mean(y)?;
    let dx = xv.mapv(|v| v - mx);
    let dy = yv.mapv(|v| v - my);

    let sxy = dx.dot(&dy);
    let sxx = dx.dot(&dx);
    let syy = dy.dot(&dy);
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    Ok(sxy / (sxx * syy).sqrt())
}

/// t-statistic of the mean, `mean / (std(ddof=1) / sqrt(n))`.
pub fn t_stat(x: &[f64]) -> Result<f64> {
    let m = mean(x)?;
    let sd = std_dev(x, 1)?;
    if is_degenerate(sd * sd, m) {
        return Err(StatsError::ZeroVariance);
    }
    Ok(m / (sd / (x.len() as f64).sqrt()))
}
