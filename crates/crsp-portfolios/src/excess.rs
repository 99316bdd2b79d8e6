//! Stock and bond excess returns on a common monthly grid.

use crate::columns::bonds::{BOND_LAG_MV, BOND_VW_RET};
use crate::columns::excess::{BOND_EXCESS_VW_RET, STOCK_EXCESS_VW_RET};
use crate::columns::market::{STOCK_LAG_MV, STOCK_VW_RET};
use crate::columns::{MONTH, YEAR};
use crate::construction::validate_columns;
use crate::error::Result;
use crsp_data::columns::riskless::T30RET;
use log::debug;
use polars::prelude::*;

fn month_keys() -> [Expr; 2] {
    [col(YEAR), col(MONTH)]
}

fn excess_over_bill(
    returns: &DataFrame,
    riskless: LazyFrame,
    lag_mv: &str,
    vw_ret: &str,
    alias: &str,
) -> LazyFrame {
    returns
        .clone()
        .lazy()
        .join(
            riskless,
            month_keys(),
            month_keys(),
            JoinArgs::new(JoinType::Left),
        )
        .select([
            col(YEAR),
            col(MONTH),
            col(lag_mv),
            (col(vw_ret) - col(T30RET)).alias(alias),
        ])
}

/// Combine the stock and bond market series with the 30-day T-bill.
///
/// `market` is the output of [`market_returns`](crate::market_returns),
/// `bonds` of [`bond_returns`](crate::bond_returns) and `riskless` the loaded
/// CRSP riskless file. Months present in either series are kept.
///
/// Output: `year, month, stock_lag_mv, stock_excess_vw_ret, bond_lag_mv,
/// bond_excess_vw_ret`.
pub fn excess_universe(
    market: &DataFrame,
    bonds: &DataFrame,
    riskless: &DataFrame,
) -> Result<DataFrame> {
    validate_columns(market, &[YEAR, MONTH, STOCK_LAG_MV, STOCK_VW_RET], "excess_universe")?;
    validate_columns(bonds, &[YEAR, MONTH, BOND_LAG_MV, BOND_VW_RET], "excess_universe")?;
    validate_columns(riskless, &[YEAR, MONTH, T30RET], "excess_universe")?;

    let bill = riskless
        .clone()
        .lazy()
        .select([col(YEAR), col(MONTH), col(T30RET)]);

    let stocks = excess_over_bill(market, bill.clone(), STOCK_LAG_MV, STOCK_VW_RET, STOCK_EXCESS_VW_RET);
    let bonds = excess_over_bill(bonds, bill, BOND_LAG_MV, BOND_VW_RET, BOND_EXCESS_VW_RET);

    let out = stocks
        .join(
            bonds,
            month_keys(),
            month_keys(),
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .select([
            col(YEAR),
            col(MONTH),
            col(STOCK_LAG_MV),
            col(STOCK_EXCESS_VW_RET),
            col(BOND_LAG_MV),
            col(BOND_EXCESS_VW_RET),
        ])
        .sort([YEAR, MONTH], Default::default())
        .collect()?;

    debug!("excess universe: {} months", out.height());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_excess_universe_outer_join() {
        let market = df! {
            "year" => [1926i32, 1926],
            "month" => [1i32, 2],
            "stock_lag_mv" => [100.0, 110.0],
            "stock_ew_ret" => [0.0, 0.0],
            "stock_vw_ret" => [0.02, 0.03],
        }
        .unwrap();
        let bonds = df! {
            "year" => [1926i32, 1926],
            "month" => [2i32, 3],
            "bond_lag_mv" => [50.0, 55.0],
            "bond_ew_ret" => [0.0, 0.0],
            "bond_vw_ret" => [0.005, 0.004],
        }
        .unwrap();
        let riskless = df! {
            "year" => [1926i32, 1926, 1926],
            "month" => [1i32, 2, 3],
            "t30ret" => [0.001, 0.002, 0.003],
            "t90ret" => [0.0, 0.0, 0.0],
        }
        .unwrap();

        let out = excess_universe(&market, &bonds, &riskless).unwrap();
        assert_eq!(out.height(), 3);

        let month = out.column("month").unwrap().as_materialized_series().i32().unwrap();
        assert_eq!(month.into_iter().collect::<Vec<_>>(), vec![Some(1), Some(2), Some(3)]);

        let s = out.column(STOCK_EXCESS_VW_RET).unwrap().as_materialized_series().f64().unwrap();
        assert_relative_eq!(s.get(0).unwrap(), 0.019, epsilon = 1e-12);
        assert_eq!(s.get(2), None);

        let b = out.column(BOND_EXCESS_VW_RET).unwrap().as_materialized_series().f64().unwrap();
        assert_eq!(b.get(0), None);
        assert_relative_eq!(b.get(1).unwrap(), 0.003, epsilon = 1e-12);
    }
}
