//! Value- and equal-weighted Treasury market returns.

use crate::columns::bonds::{BOND_EW_RET, BOND_LAG_MV, BOND_VW_RET, LAG_ME};
use crate::columns::{MONTH, YEAR};
use crate::construction::{Construction, validate_columns};
use crate::error::{PortfolioError, Result};
use crate::weighting::{value_weighted, weight_total};
use crsp_data::YearMonth;
use crsp_data::columns::bonds::{KYCRSPID, ME, RET};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

const BOND_COLUMNS: &[&str] = &[KYCRSPID, YEAR, MONTH, RET, ME];

/// Configuration for the bond market portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondConfig {
    /// First month of the sample (default: 1926-01)
    pub start: YearMonth,
    /// Last month of the sample (default: 2024-12)
    pub end: YearMonth,
    /// Divisor applied to the lagged market value (default: 1e6)
    pub scale: f64,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            start: YearMonth {
                year: 1926,
                month: 1,
            },
            end: YearMonth {
                year: 2024,
                month: 12,
            },
            scale: 1e6,
        }
    }
}

fn month_key() -> Expr {
    col(YEAR) * lit(100) + col(MONTH)
}

/// Monthly bond market returns from a loaded bond file.
///
/// Rows with a missing return or amount outstanding are dropped. Value weights
/// are each issue's amount outstanding in its previous row; an issue without
/// one still counts towards the equal-weighted return.
///
/// Output: `year, month, bond_lag_mv, bond_ew_ret, bond_vw_ret`.
pub fn bond_returns(bonds: &DataFrame, config: &BondConfig) -> Result<DataFrame> {
    validate_columns(bonds, BOND_COLUMNS, "bond_market")?;
    if config.start > config.end {
        return Err(PortfolioError::InvalidConfig(format!(
            "bond sample starts {} after it ends {}",
            config.start, config.end
        )));
    }
    if config.scale <= 0.0 {
        return Err(PortfolioError::InvalidConfig(format!(
            "bond market value scale must be positive, got {}",
            config.scale
        )));
    }

    let out = bonds
        .clone()
        .lazy()
        .filter(
            month_key()
                .gt_eq(lit(config.start.key()))
                .and(month_key().lt_eq(lit(config.end.key()))),
        )
        .filter(col(RET).is_not_null().and(col(ME).is_not_null()))
        .sort([KYCRSPID, YEAR, MONTH], Default::default())
        .with_columns([col(ME).shift(lit(1)).over([col(KYCRSPID)]).alias(LAG_ME)])
        .group_by([col(YEAR), col(MONTH)])
        .agg([
            (weight_total(LAG_ME) / lit(config.scale)).alias(BOND_LAG_MV),
            col(RET).mean().alias(BOND_EW_RET),
            value_weighted(RET, LAG_ME).alias(BOND_VW_RET),
        ])
        .sort([YEAR, MONTH], Default::default())
        .collect()?;

    debug!("bond market returns: {} months", out.height());
    Ok(out)
}

/// Bond market portfolio as a [`Construction`]
#[derive(Debug, Default)]
pub struct BondPortfolio {
    config: BondConfig,
}

impl BondPortfolio {
    /// Create with an explicit configuration.
    pub fn with_config(config: BondConfig) -> Self {
        Self { config }
    }
}

impl Construction for BondPortfolio {
    fn name(&self) -> &str {
        "bond_market"
    }

    fn required_columns(&self) -> &[&str] {
        BOND_COLUMNS
    }

    fn build(&self, data: &DataFrame) -> Result<DataFrame> {
        bond_returns(data, &self.config)
    }
}
