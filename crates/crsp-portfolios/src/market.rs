//! Value- and equal-weighted stock market returns.
//!
//! Each month's portfolio holds every admitted security that has a prior-row
//! market capitalisation. The equal-weighted return averages total returns;
//! the value-weighted return weights them by the lagged capitalisation.

use crate::columns::market::{STOCK_EW_RET, STOCK_LAG_MV, STOCK_VW_RET};
use crate::columns::panel::{LAG_MC, RET_FULL};
use crate::columns::{MONTH, YEAR};
use crate::construction::{Construction, validate_columns};
use crate::error::Result;
use crate::panel::{STOCK_COLUMNS, stock_panel};
use crate::weighting::{valid_weight, value_weighted};
use crsp_data::UniverseFilter;
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the stock market portfolio
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Share-code and exchange filter (default: ordinary shares on NYSE, AMEX, NASDAQ)
    pub universe: UniverseFilter,
}

/// Monthly stock market returns from a loaded stock file.
///
/// Output: `year, month, stock_lag_mv, stock_ew_ret, stock_vw_ret`, one row
/// per month, sorted.
pub fn market_returns(stocks: &DataFrame, config: &MarketConfig) -> Result<DataFrame> {
    validate_columns(stocks, STOCK_COLUMNS, "stock_market")?;

    let out = stock_panel(stocks, &config.universe)
        .filter(valid_weight(LAG_MC))
        .group_by([col(YEAR), col(MONTH)])
        .agg([
            col(LAG_MC).sum().alias(STOCK_LAG_MV),
            col(RET_FULL).mean().alias(STOCK_EW_RET),
            value_weighted(RET_FULL, LAG_MC).alias(STOCK_VW_RET),
        ])
        .sort([YEAR, MONTH], Default::default())
        .collect()?;

    debug!("stock market returns: {} months", out.height());
    Ok(out)
}

/// Stock market portfolio as a [`Construction`]
#[derive(Debug, Default)]
pub struct MarketPortfolio {
    config: MarketConfig,
}

impl MarketPortfolio {
    /// Create with an explicit configuration.
    pub fn with_config(config: MarketConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }
}

impl Construction for MarketPortfolio {
    fn name(&self) -> &str {
        "stock_market"
    }

    fn required_columns(&self) -> &[&str] {
        STOCK_COLUMNS
    }

    fn build(&self, data: &DataFrame) -> Result<DataFrame> {
        market_returns(data, &self.config)
    }
}
