//! Momentum ranking panel.
//!
//! The ranking return of a security in month t compounds its raw returns
//! from t-12 through t-2: an eleven-month window that skips the most recent
//! month to avoid short-term reversal.

use crate::columns::momentum::{LAG_MKT_CAP, RANKING_RET, RET};
use crate::columns::panel::{LAG_MC, RET_FULL};
use crate::columns::{MONTH, YEAR};
use crate::construction::{Construction, validate_columns};
use crate::error::{PortfolioError, Result};
use crate::frame::{f64_values, i64_values};
use crate::panel::{STOCK_COLUMNS, stock_panel};
use crsp_data::UniverseFilter;
use crsp_data::columns::stocks::{EXCHCD, PERMNO};
use crsp_stats::rolling_product_return;
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

const FILLED_RET: &str = "ret_filled";

/// Configuration for the momentum ranking panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Share-code and exchange filter
    pub universe: UniverseFilter,
    /// Months compounded into the ranking return (default: 11)
    pub window: usize,
    /// Months between the end of the window and the holding month (default: 2)
    pub skip: usize,
    /// First year kept in the panel (default: 1927)
    pub start_year: i32,
    /// Last year kept in the panel (default: 2024)
    pub end_year: i32,
    /// Divisor applied to lagged market capitalisation (default: 1e6)
    pub cap_scale: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            universe: UniverseFilter::default(),
            window: 11,
            skip: 2,
            start_year: 1927,
            end_year: 2024,
            cap_scale: 1e6,
        }
    }
}

impl RankingConfig {
    fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(PortfolioError::InvalidConfig(
                "ranking window must be at least one month".to_string(),
            ));
        }
        if self.cap_scale <= 0.0 {
            return Err(PortfolioError::InvalidConfig(format!(
                "market cap scale must be positive, got {}",
                self.cap_scale
            )));
        }
        if self.start_year > self.end_year {
            return Err(PortfolioError::InvalidConfig(format!(
                "ranking sample starts {} after it ends {}",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }
}

/// Rolling product return computed separately for each run of equal ids.
///
/// `ids` must be grouped (sorted by id, then month).
fn ranking_returns(
    ids: &[Option<i64>],
    returns: &[Option<f64>],
    window: usize,
    skip: usize,
) -> Vec<Option<f64>> {
    let n = ids.len();
    let mut out = Vec::with_capacity(n);
    let mut start = 0;
    while start < n {
        let end = ids[start..]
            .iter()
            .position(|id| *id != ids[start])
            .map_or(n, |len| start + len);
        out.extend(rolling_product_return(&returns[start..end], window, skip));
        start = end;
    }
    out
}

/// Build the momentum ranking panel from a loaded stock file.
///
/// Output: `year, month, permno, exchcd, lag_mkt_cap, ret, ranking_ret`,
/// where `ret` includes delisting returns and every row has a ranking return.
pub fn ranking_panel(stocks: &DataFrame, config: &RankingConfig) -> Result<DataFrame> {
    validate_columns(stocks, STOCK_COLUMNS, "momentum_ranking")?;
    config.validate()?;

    let mut panel = stock_panel(stocks, &config.universe)
        .with_columns([
            (col(LAG_MC) / lit(config.cap_scale)).alias(LAG_MKT_CAP),
            col(RET).fill_null(lit(0.0)).alias(FILLED_RET),
        ])
        .collect()?;

    let ids = i64_values(&panel, PERMNO)?;
    let returns = f64_values(&panel, FILLED_RET)?;
    let ranking = ranking_returns(&ids, &returns, config.window, config.skip);
    panel.with_column(Series::new(RANKING_RET.into(), ranking))?;

    let out = panel
        .lazy()
        .filter(col(RANKING_RET).is_not_null())
        .filter(
            col(YEAR)
                .gt_eq(lit(config.start_year))
                .and(col(YEAR).lt_eq(lit(config.end_year))),
        )
        .select([
            col(YEAR),
            col(MONTH),
            col(PERMNO),
            col(EXCHCD),
            col(LAG_MKT_CAP),
            col(RET_FULL).alias(RET),
            col(RANKING_RET),
        ])
        .collect()?;

    debug!(
        "momentum ranking panel: {} security-months from {} input rows",
        out.height(),
        stocks.height()
    );
    Ok(out)
}

/// Momentum ranking panel as a [`Construction`]
#[derive(Debug, Default)]
pub struct MomentumRanking {
    config: RankingConfig,
}

impl MomentumRanking {
    /// Create with an explicit configuration.
    pub fn with_config(config: RankingConfig) -> Self {
        Self { config }
    }
}

impl Construction for MomentumRanking {
    fn name(&self) -> &str {
        "momentum_ranking"
    }

    fn required_columns(&self) -> &[&str] {
        STOCK_COLUMNS
    }

    fn build(&self, data: &DataFrame) -> Result<DataFrame> {
        ranking_panel(data, &self.config)
    }
}
