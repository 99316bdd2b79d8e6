//! Security-month stock panel shared by the market and momentum constructions.

use crate::columns::panel::{LAG_MC, MC, RET_FULL};
use crate::columns::{MONTH, YEAR};
use crsp_data::Universe;
use crsp_data::columns::stocks::{DLRET, EXCHCD, PERMNO, PRC, RET, SHRCD, SHROUT};
use polars::prelude::*;

/// Columns of the loaded stock file the panel reads.
pub const STOCK_COLUMNS: &[&str] = &[PERMNO, YEAR, MONTH, SHRCD, EXCHCD, RET, DLRET, PRC, SHROUT];

/// `(1 + ret) · (1 + dlret) − 1` with missing components treated as zero.
pub fn total_return() -> Expr {
    (lit(1.0) + col(RET).fill_null(lit(0.0))) * (lit(1.0) + col(DLRET).fill_null(lit(0.0)))
        - lit(1.0)
}

/// `|prc| · shrout`; negative CRSP prices are bid/ask midpoints.
pub fn market_cap() -> Expr {
    col(PRC).abs() * col(SHROUT)
}

/// Filter to the universe, add total return and market capitalisation, sort
/// by security and month, and lag market capitalisation by one row within
/// each security.
pub fn stock_panel(stocks: &DataFrame, universe: &impl Universe) -> LazyFrame {
    stocks
        .clone()
        .lazy()
        .filter(universe.predicate())
        .with_columns([total_return().alias(RET_FULL), market_cap().alias(MC)])
        .sort([PERMNO, YEAR, MONTH], Default::default())
        .with_columns([col(MC).shift(lit(1)).over([col(PERMNO)]).alias(LAG_MC)])
}
