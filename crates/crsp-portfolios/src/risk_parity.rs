//! Risk-parity stock/bond portfolios.
//!
//! Each asset class is weighted by the inverse of its trailing volatility.
//! The unlevered portfolio scales those weights to sum to one; the levered
//! portfolio is then scaled so that its trailing volatility matches the
//! market-value weighted stock/bond portfolio.

use crate::columns::bonds::BOND_LAG_MV;
use crate::columns::market::STOCK_LAG_MV;
use crate::columns::risk_parity::{
    BOND_EXCESS_VW_RET, BOND_INVERSE_SIGMA_HAT, EXCESS_60_40_RET, EXCESS_LEVERED_RP_RET,
    EXCESS_UNLEVERED_RP_RET, EXCESS_VW_RET, LEVERED_K, STOCK_EXCESS_VW_RET,
    STOCK_INVERSE_SIGMA_HAT, UNLEVERED_K,
};
use crate::columns::{MONTH, YEAR};
use crate::construction::{Construction, validate_columns};
use crate::error::{PortfolioError, Result};
use crate::frame::{f64_values, i32_values};
use crsp_stats::{lag, rolling_std};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

const UNIVERSE_COLUMNS: &[&str] = &[
    YEAR,
    MONTH,
    STOCK_LAG_MV,
    STOCK_EXCESS_VW_RET,
    BOND_LAG_MV,
    BOND_EXCESS_VW_RET,
];

/// Configuration for the risk-parity portfolios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParityConfig {
    /// Months in the volatility window (default: 36)
    pub vol_window: usize,
    /// Delta degrees of freedom of the volatility estimate (default: 1)
    pub ddof: usize,
    /// Stock share of the fixed-mix portfolio (default: 0.6)
    pub stock_weight_60_40: f64,
    /// Estimate volatility from the window ending the month before (default: false)
    pub lag_volatility: bool,
}

impl Default for RiskParityConfig {
    fn default() -> Self {
        Self {
            vol_window: 36,
            ddof: 1,
            stock_weight_60_40: 0.6,
            lag_volatility: false,
        }
    }
}

impl RiskParityConfig {
    fn validate(&self) -> Result<()> {
        if self.vol_window <= self.ddof {
            return Err(PortfolioError::InvalidConfig(format!(
                "volatility window {} must exceed ddof {}",
                self.vol_window, self.ddof
            )));
        }
        if !(0.0..=1.0).contains(&self.stock_weight_60_40) {
            return Err(PortfolioError::InvalidConfig(format!(
                "fixed-mix stock weight {} outside [0, 1]",
                self.stock_weight_60_40
            )));
        }
        Ok(())
    }

    fn volatility(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        let vol = rolling_std(values, self.vol_window, self.ddof);
        if self.lag_volatility { lag(&vol, 1) } else { vol }
    }
}

fn ratio(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    match (num, den) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

fn inverse(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values.iter().map(|v| ratio(Some(1.0), *v)).collect()
}

/// Risk-parity portfolios from the stock/bond excess universe.
///
/// `universe` is the output of [`excess_universe`](crate::excess_universe).
/// Rows are processed in month order and every rolling window is positional.
/// A month with any missing input, or a zero denominator, is null in the
/// affected columns.
pub fn risk_parity(universe: &DataFrame, config: &RiskParityConfig) -> Result<DataFrame> {
    validate_columns(universe, UNIVERSE_COLUMNS, "risk_parity")?;
    config.validate()?;

    let sorted = universe
        .clone()
        .lazy()
        .sort([YEAR, MONTH], Default::default())
        .collect()?;

    let year = i32_values(&sorted, YEAR)?;
    let month = i32_values(&sorted, MONTH)?;
    let stock = f64_values(&sorted, STOCK_EXCESS_VW_RET)?;
    let bond = f64_values(&sorted, BOND_EXCESS_VW_RET)?;
    let stock_mv = f64_values(&sorted, STOCK_LAG_MV)?;
    let bond_mv = f64_values(&sorted, BOND_LAG_MV)?;
    let n = sorted.height();

    let stock_inv = inverse(&config.volatility(&stock));
    let bond_inv = inverse(&config.volatility(&bond));

    let mut vw = Vec::with_capacity(n);
    let mut mix = Vec::with_capacity(n);
    let mut unlevered_k = Vec::with_capacity(n);
    let mut unlevered = Vec::with_capacity(n);
    let w = config.stock_weight_60_40;

    for t in 0..n {
        let value_weighted = match (stock_mv[t], stock[t], bond_mv[t], bond[t]) {
            (Some(sm), Some(s), Some(bm), Some(b)) => ratio(Some(sm * s + bm * b), Some(sm + bm)),
            _ => None,
        };
        vw.push(value_weighted);
        mix.push(stock[t].zip(bond[t]).map(|(s, b)| w * s + (1.0 - w) * b));

        let k = match (stock_inv[t], bond_inv[t]) {
            (Some(si), Some(bi)) => ratio(Some(1.0), Some(si + bi)),
            _ => None,
        };
        unlevered_k.push(k);
        unlevered.push(match (k, stock_inv[t], stock[t], bond_inv[t], bond[t]) {
            (Some(k), Some(si), Some(s), Some(bi), Some(b)) => Some(k * (si * s + bi * b)),
            _ => None,
        });
    }

    let vw_vol = config.volatility(&vw);
    let rp_vol = config.volatility(&unlevered);
    let levered_k: Vec<Option<f64>> = vw_vol
        .iter()
        .zip(&rp_vol)
        .map(|(v, r)| ratio(*v, *r))
        .collect();
    let levered: Vec<Option<f64>> = levered_k
        .iter()
        .zip(&unlevered)
        .map(|(k, r)| k.zip(*r).map(|(k, r)| k * r))
        .collect();

    debug!(
        "risk parity: {} months, {} with a levered return",
        n,
        levered.iter().flatten().count()
    );

    Ok(DataFrame::new(vec![
        Series::new(YEAR.into(), year).into(),
        Series::new(MONTH.into(), month).into(),
        Series::new(STOCK_EXCESS_VW_RET.into(), stock).into(),
        Series::new(BOND_EXCESS_VW_RET.into(), bond).into(),
        Series::new(EXCESS_VW_RET.into(), vw).into(),
        Series::new(EXCESS_60_40_RET.into(), mix).into(),
        Series::new(STOCK_INVERSE_SIGMA_HAT.into(), stock_inv).into(),
        Series::new(BOND_INVERSE_SIGMA_HAT.into(), bond_inv).into(),
        Series::new(UNLEVERED_K.into(), unlevered_k).into(),
        Series::new(EXCESS_UNLEVERED_RP_RET.into(), unlevered).into(),
        Series::new(LEVERED_K.into(), levered_k).into(),
        Series::new(EXCESS_LEVERED_RP_RET.into(), levered).into(),
    ])?)
}

/// Risk-parity portfolios as a [`Construction`] over the excess universe
#[derive(Debug, Default)]
pub struct RiskParityPortfolio {
    config: RiskParityConfig,
}

impl RiskParityPortfolio {
    /// Create with an explicit configuration.
    pub fn with_config(config: RiskParityConfig) -> Self {
        Self { config }
    }
}

impl Construction for RiskParityPortfolio {
    fn name(&self) -> &str {
        "risk_parity"
    }

    fn required_columns(&self) -> &[&str] {
        UNIVERSE_COLUMNS
    }

    fn build(&self, data: &DataFrame) -> Result<DataFrame> {
        risk_parity(data, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crsp_stats::std_dev;

    fn universe(n: usize) -> DataFrame {
        let year: Vec<i32> = (0..n).map(|t| 1930 + (t / 12) as i32).collect();
        let month: Vec<i32> = (0..n).map(|t| (t % 12) as i32 + 1).collect();
        let stock: Vec<f64> = (0..n).map(|t| 0.04 * ((t as f64) * 0.7).sin()).collect();
        let bond: Vec<f64> = (0..n).map(|t| 0.01 * ((t as f64) * 1.3).cos()).collect();
        df! {
            "year" => year,
            "month" => month,
            "stock_lag_mv" => vec![300.0; n],
            "stock_excess_vw_ret" => stock,
            "bond_lag_mv" => vec![100.0; n],
            "bond_excess_vw_ret" => bond,
        }
        .unwrap()
    }

    fn column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_fixed_mixes() {
        let out = risk_parity(&universe(10), &RiskParityConfig::default()).unwrap();
        let s = column(&out, STOCK_EXCESS_VW_RET);
        let b = column(&out, BOND_EXCESS_VW_RET);
        let vw = column(&out, EXCESS_VW_RET);
        let mix = column(&out, EXCESS_60_40_RET);
        for t in 0..10 {
            let (s, b) = (s[t].unwrap(), b[t].unwrap());
            assert_relative_eq!(vw[t].unwrap(), 0.75 * s + 0.25 * b, epsilon = 1e-12);
            assert_relative_eq!(mix[t].unwrap(), 0.6 * s + 0.4 * b, epsilon = 1e-12);
        }
        // Shorter than the volatility window: nothing risk-based yet.
        assert!(column(&out, EXCESS_LEVERED_RP_RET).iter().all(Option::is_none));
    }

    #[test]
    fn test_unlevered_weights_sum_to_one_and_leverage_matches_volatility() {
        let config = RiskParityConfig {
            vol_window: 12,
            ..Default::default()
        };
        let out = risk_parity(&universe(40), &config).unwrap();
        let si = column(&out, STOCK_INVERSE_SIGMA_HAT);
        let bi = column(&out, BOND_INVERSE_SIGMA_HAT);
        let k = column(&out, UNLEVERED_K);

        assert_eq!(si[10], None);
        for t in 11..40 {
            let weights = k[t].unwrap() * (si[t].unwrap() + bi[t].unwrap());
            assert_relative_eq!(weights, 1.0, epsilon = 1e-12);
        }

        let vw = column(&out, EXCESS_VW_RET);
        let levered = column(&out, EXCESS_LEVERED_RP_RET);
        let levered_k = column(&out, LEVERED_K);
        let unlevered = column(&out, EXCESS_UNLEVERED_RP_RET);
        // The first full window of unlevered returns ends at 11 + 11.
        assert_eq!(levered[21], None);
        let t = 22;
        let window = |x: &[Option<f64>]| -> Vec<f64> {
            x[t - 11..=t].iter().map(|v| v.unwrap()).collect()
        };
        let expected =
            std_dev(&window(&vw), 1).unwrap() / std_dev(&window(&unlevered), 1).unwrap();
        assert_relative_eq!(levered_k[t].unwrap(), expected, epsilon = 1e-10);
        assert_relative_eq!(
            levered[t].unwrap(),
            expected * unlevered[t].unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_lagged_volatility_shifts_by_one_month() {
        let base = risk_parity(
            &universe(20),
            &RiskParityConfig {
                vol_window: 6,
                ..Default::default()
            },
        )
        .unwrap();
        let lagged = risk_parity(
            &universe(20),
            &RiskParityConfig {
                vol_window: 6,
                lag_volatility: true,
                ..Default::default()
            },
        )
        .unwrap();
        let a = column(&base, STOCK_INVERSE_SIGMA_HAT);
        let b = column(&lagged, STOCK_INVERSE_SIGMA_HAT);
        assert_eq!(b[5], None);
        assert_relative_eq!(b[6].unwrap(), a[5].unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_window() {
        let config = RiskParityConfig {
            vol_window: 1,
            ..Default::default()
        };
        assert!(matches!(
            risk_parity(&universe(5), &config),
            Err(PortfolioError::InvalidConfig(_))
        ));
    }
}
