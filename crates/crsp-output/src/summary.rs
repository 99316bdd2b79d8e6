//! Summary statistics and performance tables.
//!
//! Each table row describes one monthly excess-return series: annualised
//! mean and its t-statistic, annualised volatility, Sharpe ratio, skewness,
//! excess kurtosis and, where a benchmark exists, the correlation with it.
//! Statistics that are undefined for the sample (a constant series, say) are
//! reported as `NaN` rather than failing the whole table.

use crate::frame::{self, f64_values, i32_values};
use crate::sample::SampleWindow;
use crsp_data::YearMonth;
use crsp_data::columns::french::{MKT_RF, RF as FF_RF};
use crsp_data::columns::benchmark as bench_columns;
use crsp_data::columns::{MONTH, YEAR};
use crsp_data::french::deciles::DECILES;
use crsp_portfolios::columns::market::STOCK_VW_RET;
use crsp_portfolios::columns::momentum::{DECILE, DM_RET, KRF_RET, RF};
use crsp_portfolios::columns::risk_parity::{
    BOND_EXCESS_VW_RET, EXCESS_60_40_RET, EXCESS_LEVERED_RP_RET, EXCESS_UNLEVERED_RP_RET,
    EXCESS_VW_RET, STOCK_EXCESS_VW_RET,
};
use crsp_stats::{
    StatsError, annualized_mean, annualized_sharpe, annualized_volatility, correlation,
    excess_kurtosis, skewness, t_stat,
};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while building a table.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Statistic could not be computed.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Frame operation failed.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Input frame lacks a column the table reads.
    #[error("Missing column '{column}' for {table}")]
    MissingColumn {
        /// Column name.
        column: String,
        /// Table being built.
        table: &'static str,
    },

    /// No month of the input falls inside the sample window.
    #[error("No observations for {0} in the sample window")]
    Empty(String),
}

/// Result type for table builders.
pub type Result<T> = std::result::Result<T, SummaryError>;

fn require_columns(df: &DataFrame, columns: &[&str], table: &'static str) -> Result<()> {
    let present = df.get_column_names();
    for c in columns {
        if !present.iter().any(|p| p.as_str() == *c) {
            return Err(SummaryError::MissingColumn {
                column: (*c).to_string(),
                table,
            });
        }
    }
    Ok(())
}

/// Performance statistics of one monthly excess-return series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    /// Series label.
    pub name: String,
    /// Mean × 12.
    pub annualized_mean: f64,
    /// t-statistic of the mean.
    pub t_stat: f64,
    /// Standard deviation × √12.
    pub annualized_volatility: f64,
    /// Annualised mean over annualised volatility.
    pub sharpe: f64,
    /// Skewness.
    pub skewness: f64,
    /// Kurtosis in excess of 3.
    pub excess_kurtosis: f64,
    /// Number of months.
    pub observations: usize,
    /// Correlation with the table's benchmark, if any.
    pub correlation: Option<f64>,
}

impl PerformanceStats {
    /// Compute the statistics of a monthly excess-return series.
    ///
    /// Statistics the sample cannot support are `NaN`: the mean of an empty
    /// series, or the volatility of a single month.
    pub fn from_returns(name: impl Into<String>, excess: &[f64]) -> Self {
        Self {
            name: name.into(),
            annualized_mean: annualized_mean(excess).unwrap_or(f64::NAN),
            t_stat: t_stat(excess).unwrap_or(f64::NAN),
            annualized_volatility: annualized_volatility(excess).unwrap_or(f64::NAN),
            sharpe: annualized_sharpe(excess).unwrap_or(f64::NAN),
            skewness: skewness(excess).unwrap_or(f64::NAN),
            excess_kurtosis: excess_kurtosis(excess).unwrap_or(f64::NAN),
            observations: excess.len(),
            correlation: None,
        }
    }

    /// Replace the skewness, e.g. with that of log gross returns.
    pub const fn with_skewness(mut self, skewness: f64) -> Self {
        self.skewness = skewness;
        self
    }

    /// Attach a benchmark correlation.
    pub const fn with_correlation(mut self, correlation: Option<f64>) -> Self {
        self.correlation = correlation;
        self
    }
}

/// A titled set of [`PerformanceStats`] rows over one sample period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTable {
    /// Table title.
    pub title: String,
    /// First month with data.
    pub period_start: YearMonth,
    /// Last month with data.
    pub period_end: YearMonth,
    /// Label of the series the correlation column refers to.
    pub benchmark: Option<String>,
    /// One row per series.
    pub rows: Vec<PerformanceStats>,
}

const WIDTH: usize = 98;

fn number(x: f64) -> String {
    format!("{x:.4}")
}

fn optional(x: Option<f64>) -> String {
    x.map_or_else(|| "-".to_string(), number)
}

impl PerformanceTable {
    /// Find a row by series name.
    pub fn row(&self, name: &str) -> Option<&PerformanceStats> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Render as a fixed-width text table.
    pub fn to_ascii_table(&self) -> String {
        let mut lines = Vec::new();
        lines.push("=".repeat(WIDTH));
        lines.push(self.title.clone());
        lines.push(format!("Sample: {} to {}", self.period_start, self.period_end));
        if let Some(benchmark) = &self.benchmark {
            lines.push(format!("Correlation with: {benchmark}"));
        }
        lines.push("=".repeat(WIDTH));
        lines.push(format!(
            "{:<26}{:>10}{:>9}{:>10}{:>9}{:>9}{:>9}{:>9}{:>7}",
            "Series", "Ann.Mean", "t-stat", "Ann.Vol", "Sharpe", "Skew", "ExKurt", "Corr", "N"
        ));
        lines.push("-".repeat(WIDTH));
        for r in &self.rows {
            lines.push(format!(
                "{:<26}{:>10}{:>9}{:>10}{:>9}{:>9}{:>9}{:>9}{:>7}",
                r.name,
                number(r.annualized_mean),
                number(r.t_stat),
                number(r.annualized_volatility),
                number(r.sharpe),
                number(r.skewness),
                number(r.excess_kurtosis),
                optional(r.correlation),
                r.observations
            ));
        }
        lines.push("=".repeat(WIDTH));
        lines.join("\n")
    }

    /// Render as a Markdown section.
    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "## {}\n\nSample: {} to {}\n\n",
            self.title, self.period_start, self.period_end
        );
        if let Some(benchmark) = &self.benchmark {
            md.push_str(&format!("Correlation with: {benchmark}\n\n"));
        }
        md.push_str(
            "| Series | Annualized Mean | t-stat | Annualized Volatility | Sharpe Ratio | Skewness | Excess Kurtosis | Correlation | N |\n",
        );
        md.push_str("|---|---:|---:|---:|---:|---:|---:|---:|---:|\n");
        for r in &self.rows {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                r.name,
                number(r.annualized_mean),
                number(r.t_stat),
                number(r.annualized_volatility),
                number(r.sharpe),
                number(r.skewness),
                number(r.excess_kurtosis),
                optional(r.correlation),
                r.observations
            ));
        }
        md
    }
}

impl fmt::Display for PerformanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

/// Label of the replicated market series.
pub const CRSP_MARKET_LABEL: &str = "CRSP VW excess";
/// Label of the Fama-French market factor.
pub const FF_MARKET_LABEL: &str = "Fama-French Mkt-RF";

/// Month-aligned CRSP value-weighted excess return and Fama-French `mkt_rf`.
///
/// `monthly` is the stock market output; the excess return uses the
/// Fama-French `rf`. Only months where both series are present are kept.
///
/// Output: `year, month, stock_excess_vw_ret, mkt_rf` sorted by month.
pub fn market_excess(
    monthly: &DataFrame,
    factors: &DataFrame,
    window: &SampleWindow,
) -> Result<DataFrame> {
    require_columns(monthly, &[YEAR, MONTH, STOCK_VW_RET], "market table")?;
    require_columns(factors, &[YEAR, MONTH, MKT_RF, FF_RF], "market table")?;

    let ff = factors
        .clone()
        .lazy()
        .select([col(YEAR), col(MONTH), col(MKT_RF), col(FF_RF)]);
    let joined = monthly
        .clone()
        .lazy()
        .select([col(YEAR), col(MONTH), col(STOCK_VW_RET)])
        .join(
            ff,
            [col(YEAR), col(MONTH)],
            [col(YEAR), col(MONTH)],
            JoinArgs::new(JoinType::Inner),
        )
        .select([
            col(YEAR),
            col(MONTH),
            (col(STOCK_VW_RET) - col(FF_RF)).alias(STOCK_EXCESS_VW_RET),
            col(MKT_RF),
        ])
        .filter(
            col(STOCK_EXCESS_VW_RET)
                .is_not_null()
                .and(col(MKT_RF).is_not_null()),
        )
        .sort([YEAR, MONTH], Default::default());

    Ok(window.apply(joined).collect()?)
}

/// CRSP value-weighted excess return against the Fama-French market factor.
pub fn market_table(
    monthly: &DataFrame,
    factors: &DataFrame,
    window: &SampleWindow,
) -> Result<PerformanceTable> {
    let aligned = market_excess(monthly, factors, window)?;
    let (period_start, period_end) = frame::span(&frame::months(&aligned)?)
        .ok_or_else(|| SummaryError::Empty("market table".to_string()))?;

    let crsp: Vec<f64> = f64_values(&aligned, STOCK_EXCESS_VW_RET)?
        .into_iter()
        .flatten()
        .collect();
    let ff: Vec<f64> = f64_values(&aligned, MKT_RF)?
        .into_iter()
        .flatten()
        .collect();
    let corr = correlation(&crsp, &ff).ok();

    debug!("market table: {} months", crsp.len());
    Ok(PerformanceTable {
        title: "CRSP value-weighted market vs Fama-French Mkt-RF".to_string(),
        period_start,
        period_end,
        benchmark: Some(FF_MARKET_LABEL.to_string()),
        rows: vec![
            PerformanceStats::from_returns(CRSP_MARKET_LABEL, &crsp).with_correlation(corr),
            PerformanceStats::from_returns(FF_MARKET_LABEL, &ff),
        ],
    })
}

/// Series reported by [`risk_parity_table`], in row order.
pub const RISK_PARITY_SERIES: [(&str, &str); 6] = [
    ("CRSP stocks", STOCK_EXCESS_VW_RET),
    ("CRSP bonds", BOND_EXCESS_VW_RET),
    ("Value-weighted portfolio", EXCESS_VW_RET),
    ("60/40 portfolio", EXCESS_60_40_RET),
    ("Unlevered RP", EXCESS_UNLEVERED_RP_RET),
    ("Levered RP", EXCESS_LEVERED_RP_RET),
];

/// Excess-return statistics of the stock, bond and allocation series.
///
/// Each series drops its own null months, so the rolling-volatility
/// portfolios start later than the plain stock and bond series.
pub fn risk_parity_table(portfolios: &DataFrame, window: &SampleWindow) -> Result<PerformanceTable> {
    let mut columns = vec![YEAR, MONTH];
    columns.extend(RISK_PARITY_SERIES.iter().map(|(_, c)| *c));
    require_columns(portfolios, &columns, "risk-parity table")?;

    let sample = window
        .apply(portfolios.clone().lazy())
        .sort([YEAR, MONTH], Default::default())
        .collect()?;
    let (period_start, period_end) = frame::span(&frame::months(&sample)?)
        .ok_or_else(|| SummaryError::Empty("risk-parity table".to_string()))?;

    let mut rows = Vec::with_capacity(RISK_PARITY_SERIES.len());
    for (label, column) in RISK_PARITY_SERIES {
        let values: Vec<f64> = f64_values(&sample, column)?
            .into_iter()
            .flatten()
            .collect();
        rows.push(PerformanceStats::from_returns(label, &values));
    }

    Ok(PerformanceTable {
        title: "Stock, bond and risk-parity excess returns".to_string(),
        period_start,
        period_end,
        benchmark: None,
        rows,
    })
}

/// Decile breakpoint policy a momentum table reports on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakpointPolicy {
    /// Universe-wide breakpoints (Daniel-Moskowitz)
    #[default]
    Dm,
    /// NYSE breakpoints (Kenneth R. French)
    Krf,
}

impl BreakpointPolicy {
    /// Return column of the decile returns frame.
    pub const fn return_column(&self) -> &'static str {
        match self {
            Self::Dm => DM_RET,
            Self::Krf => KRF_RET,
        }
    }

    /// Published series this policy replicates.
    pub const fn benchmark_name(&self) -> &'static str {
        match self {
            Self::Dm => "Daniel-Moskowitz momentum deciles",
            Self::Krf => "Kenneth French momentum deciles",
        }
    }
}

impl fmt::Display for BreakpointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dm => write!(f, "DM"),
            Self::Krf => write!(f, "KRF"),
        }
    }
}

/// Label of the winners-minus-losers row.
pub const WML_LABEL: &str = "WML";

#[derive(Debug, Clone, Copy)]
struct DecileMonth {
    returns: [Option<f64>; DECILES],
    rf: Option<f64>,
}

impl DecileMonth {
    const fn decile(&self, decile: usize) -> Option<f64> {
        self.returns[decile - 1]
    }

    fn wml(&self) -> Option<f64> {
        Some(self.decile(DECILES)? - self.decile(1)?)
    }
}

type DecileGrid = BTreeMap<YearMonth, DecileMonth>;

fn decile_grid(df: &DataFrame, ret: &str, rf: Option<&str>) -> PolarsResult<DecileGrid> {
    let months = frame::months(df)?;
    let deciles = i32_values(df, DECILE)?;
    let returns = f64_values(df, ret)?;
    let rates = match rf {
        Some(column) => f64_values(df, column)?,
        None => vec![None; df.height()],
    };

    let mut grid = DecileGrid::new();
    for i in 0..df.height() {
        let (Some(month), Some(decile)) = (months[i], deciles[i]) else {
            continue;
        };
        if !(1..=DECILES as i32).contains(&decile) {
            continue;
        }
        let entry = grid.entry(month).or_insert(DecileMonth {
            returns: [None; DECILES],
            rf: None,
        });
        entry.returns[(decile - 1) as usize] = returns[i];
        if rates[i].is_some() {
            entry.rf = rates[i];
        }
    }
    Ok(grid)
}

/// One month of a momentum series: the raw return, the excess return and
/// the gross return whose log enters the skewness.
#[derive(Debug, Clone, Copy)]
struct MomentumMonth {
    month: YearMonth,
    ret: f64,
    excess: f64,
    gross: f64,
}

fn momentum_row(
    name: String,
    series: &[MomentumMonth],
    benchmark: Option<&BTreeMap<YearMonth, f64>>,
) -> PerformanceStats {
    let excess: Vec<f64> = series.iter().map(|m| m.excess).collect();
    let logs: Vec<f64> = series
        .iter()
        .map(|m| m.gross.ln())
        .filter(|v| v.is_finite())
        .collect();
    let corr = benchmark.and_then(|b| {
        let (x, y): (Vec<f64>, Vec<f64>) = series
            .iter()
            .filter_map(|m| b.get(&m.month).map(|v| (m.ret, *v)))
            .unzip();
        correlation(&x, &y).ok()
    });

    PerformanceStats::from_returns(name, &excess)
        .with_skewness(skewness(&logs).unwrap_or(f64::NAN))
        .with_correlation(corr)
}

fn benchmark_series(
    grid: &DecileGrid,
    pick: impl Fn(&DecileMonth) -> Option<f64>,
) -> BTreeMap<YearMonth, f64> {
    grid.iter()
        .filter_map(|(month, row)| pick(row).map(|v| (*month, v)))
        .collect()
}

/// Decile and WML statistics for one breakpoint policy.
///
/// `returns` is the decile returns frame (`year, month, decile, dm_ret,
/// krf_ret, rf`); `benchmark` an optional long benchmark frame (`year,
/// month, decile, ret`). For each decile the mean, volatility and Sharpe
/// ratio use `ret - rf`, the skewness uses `ln(1 + ret)`. WML is decile 10
/// minus decile 1; its excess return is `wml - rf` and its skewness uses
/// `ln(1 + wml + rf)`. Correlations pair raw returns with the benchmark on
/// matching months.
pub fn momentum_table(
    returns: &DataFrame,
    benchmark: Option<&DataFrame>,
    policy: BreakpointPolicy,
    window: &SampleWindow,
) -> Result<PerformanceTable> {
    let ret_column = policy.return_column();
    require_columns(returns, &[YEAR, MONTH, DECILE, ret_column, RF], "momentum table")?;

    let sample = window.apply(returns.clone().lazy()).collect()?;
    let grid = decile_grid(&sample, ret_column, Some(RF))?;
    let period_start = *grid
        .keys()
        .next()
        .ok_or_else(|| SummaryError::Empty(format!("{policy} momentum table")))?;
    let period_end = grid.keys().next_back().copied().unwrap_or(period_start);

    let bench_grid = match benchmark {
        Some(b) => {
            require_columns(
                b,
                &[YEAR, MONTH, bench_columns::DECILE, bench_columns::RET],
                "momentum table",
            )?;
            let b = window.apply(b.clone().lazy()).collect()?;
            Some(decile_grid(&b, bench_columns::RET, None)?)
        }
        None => None,
    };

    let mut rows = Vec::with_capacity(DECILES + 1);
    for decile in 1..=DECILES {
        let series: Vec<MomentumMonth> = grid
            .iter()
            .filter_map(|(month, row)| {
                let ret = row.decile(decile)?;
                let rf = row.rf?;
                Some(MomentumMonth {
                    month: *month,
                    ret,
                    excess: ret - rf,
                    gross: 1.0 + ret,
                })
            })
            .collect();
        let bench = bench_grid
            .as_ref()
            .map(|g| benchmark_series(g, |row| row.decile(decile)));
        rows.push(momentum_row(
            format!("Decile {decile}"),
            &series,
            bench.as_ref(),
        ));
    }

    let wml: Vec<MomentumMonth> = grid
        .iter()
        .filter_map(|(month, row)| {
            let wml = row.wml()?;
            let rf = row.rf?;
            Some(MomentumMonth {
                month: *month,
                ret: wml,
                excess: wml - rf,
                gross: 1.0 + wml + rf,
            })
        })
        .collect();
    let bench_wml = bench_grid
        .as_ref()
        .map(|g| benchmark_series(g, DecileMonth::wml));
    rows.push(momentum_row(
        WML_LABEL.to_string(),
        &wml,
        bench_wml.as_ref(),
    ));

    debug!(
        "{policy} momentum table: {} months, {} WML months",
        grid.len(),
        wml.len()
    );
    Ok(PerformanceTable {
        title: format!("Momentum deciles, {policy} breakpoints"),
        period_start,
        period_end,
        benchmark: benchmark.map(|_| policy.benchmark_name().to_string()),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_from_returns() {
        let x = [0.01, 0.03, -0.02, 0.02];
        let stats = PerformanceStats::from_returns("x", &x);
        assert_eq!(stats.observations, 4);
        assert_relative_eq!(stats.annualized_mean, 0.0075 * 12.0, epsilon = 1e-12);
        assert_relative_eq!(
            stats.sharpe,
            stats.annualized_mean / stats.annualized_volatility,
            epsilon = 1e-12
        );
        assert!(stats.correlation.is_none());
    }

    #[test]
    fn test_constant_series_reports_nan() {
        let stats = PerformanceStats::from_returns("flat", &[0.125; 6]);
        assert!(stats.sharpe.is_nan());
        assert!(stats.t_stat.is_nan());
        assert!(stats.skewness.is_nan());
        assert_relative_eq!(stats.annualized_volatility, 0.0);
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&[0.01], 1)]
    fn test_too_short_reports_nan(#[case] x: &[f64], #[case] n: usize) {
        let stats = PerformanceStats::from_returns("x", x);
        assert_eq!(stats.observations, n);
        assert!(stats.annualized_volatility.is_nan());
        assert!(stats.sharpe.is_nan());
        assert!(stats.t_stat.is_nan());
    }

    #[test]
    fn test_single_month_annualized_mean() {
        let stats = PerformanceStats::from_returns("x", &[0.01]);
        assert_relative_eq!(stats.annualized_mean, 0.12, epsilon = 1e-12);
    }

    fn table() -> PerformanceTable {
        PerformanceTable {
            title: "Test".to_string(),
            period_start: ym(1926, 7),
            period_end: ym(1926, 10),
            benchmark: Some("Bench".to_string()),
            rows: vec![
                PerformanceStats::from_returns("A", &[0.01, 0.02, -0.01, 0.03])
                    .with_correlation(Some(0.5)),
            ],
        }
    }

    #[test]
    fn test_rendering() {
        let t = table();
        let ascii = t.to_ascii_table();
        assert!(ascii.contains("Sample: 1926-07 to 1926-10"));
        assert!(ascii.contains("Correlation with: Bench"));
        assert!(ascii.contains("0.5000"));
        assert_eq!(t.to_string(), ascii);

        let md = t.to_markdown();
        assert!(md.starts_with("## Test"));
        assert!(md.contains("| A |"));
        assert!(t.row("A").is_some());
        assert!(t.row("B").is_none());
    }

    #[test]
    fn test_market_table() {
        let monthly = df! {
            "year" => [1926i32, 1926, 1926, 1926, 1926],
            "month" => [6i32, 7, 8, 9, 10],
            "stock_vw_ret" => [Some(0.5), Some(0.03), Some(0.02), None, Some(-0.01)],
        }
        .unwrap();
        let factors = df! {
            "year" => [1926i32, 1926, 1926, 1926, 1926],
            "month" => [6i32, 7, 8, 9, 10],
            "mkt_rf" => [0.0, 0.025, 0.018, 0.01, -0.012],
            "smb" => [0.0; 5],
            "hml" => [0.0; 5],
            "rf" => [0.002; 5],
        }
        .unwrap();
        let window = SampleWindow::starting(ym(1926, 7));
        let aligned = market_excess(&monthly, &factors, &window).unwrap();
        // June is outside the window and September has no CRSP return.
        assert_eq!(aligned.height(), 3);

        let table = market_table(&monthly, &factors, &window).unwrap();
        assert_eq!(table.period_start, ym(1926, 7));
        assert_eq!(table.period_end, ym(1926, 10));
        let crsp = table.row(CRSP_MARKET_LABEL).unwrap();
        assert_eq!(crsp.observations, 3);
        assert_relative_eq!(
            crsp.annualized_mean,
            (0.028 + 0.018 - 0.012) / 3.0 * 12.0,
            epsilon = 1e-12
        );
        assert!(crsp.correlation.unwrap() > 0.99);
    }

    #[test]
    fn test_market_table_missing_column() {
        let monthly = df! { "year" => [1926i32], "month" => [7i32] }.unwrap();
        let factors = df! { "year" => [1926i32], "month" => [7i32] }.unwrap();
        let err = market_table(&monthly, &factors, &SampleWindow::default()).unwrap_err();
        assert!(matches!(err, SummaryError::MissingColumn { .. }));
    }

    #[test]
    fn test_risk_parity_table_drops_nulls_per_series() {
        let rp = df! {
            "year" => [1929i32, 1929, 1929, 1929],
            "month" => [1i32, 2, 3, 4],
            "stock_excess_vw_ret" => [0.01, 0.02, -0.01, 0.03],
            "bond_excess_vw_ret" => [0.001, 0.002, 0.0, -0.001],
            "excess_vw_ret" => [0.008, 0.015, -0.007, 0.02],
            "excess_60_40_ret" => [0.0064, 0.0128, -0.006, 0.0176],
            "excess_unlevered_rp_ret" => [None, Some(0.004), Some(0.001), Some(0.002)],
            "excess_levered_rp_ret" => [None, None, Some(0.01), Some(0.02)],
        }
        .unwrap();
        let table = risk_parity_table(&rp, &SampleWindow::default()).unwrap();
        let counts: Vec<usize> = table.rows.iter().map(|r| r.observations).collect();
        assert_eq!(counts, vec![4, 4, 4, 4, 3, 2]);
        assert_eq!(table.rows[0].name, "CRSP stocks");
        assert_eq!(table.rows[5].name, "Levered RP");
    }

    /// Three months of decile returns: decile d returns d·m% in month m,
    /// rf 0.1%.
    fn decile_returns() -> DataFrame {
        let mut year = Vec::new();
        let mut month = Vec::new();
        let mut decile = Vec::new();
        let mut ret = Vec::new();
        for m in 1..=3 {
            for d in 1..=10 {
                year.push(1927i32);
                month.push(m as i32);
                decile.push(d as i32);
                ret.push(Some(d as f64 * m as f64 / 100.0));
            }
        }
        let n = ret.len();
        df! {
            "year" => year,
            "month" => month,
            "decile" => decile,
            "dm_ret" => ret.clone(),
            "krf_ret" => ret,
            "rf" => vec![0.001; n],
        }
        .unwrap()
    }

    #[test]
    fn test_momentum_table() {
        let returns = decile_returns();
        let benchmark = returns
            .clone()
            .lazy()
            .select([
                col("year"),
                col("month"),
                col("decile"),
                col("dm_ret").alias("ret"),
            ])
            .collect()
            .unwrap();
        let table = momentum_table(
            &returns,
            Some(&benchmark),
            BreakpointPolicy::Dm,
            &SampleWindow::years(1927, 1927),
        )
        .unwrap();

        assert_eq!(table.rows.len(), 11);
        assert_eq!(table.rows[10].name, WML_LABEL);
        assert_eq!(table.period_end, ym(1927, 3));

        // Decile 1 returns 1%, 2%, 3%.
        let d1 = &table.rows[0];
        assert_relative_eq!(d1.annualized_mean, (0.02 - 0.001) * 12.0, epsilon = 1e-12);
        let logs = [1.01f64.ln(), 1.02f64.ln(), 1.03f64.ln()];
        assert_relative_eq!(d1.skewness, skewness(&logs).unwrap(), epsilon = 1e-12);
        // Benchmark identical to the replicated series.
        assert_relative_eq!(d1.correlation.unwrap(), 1.0, epsilon = 1e-12);

        // WML = 9m% each month.
        let wml = &table.rows[10];
        assert_eq!(wml.observations, 3);
        assert_relative_eq!(wml.annualized_mean, (0.18 - 0.001) * 12.0, epsilon = 1e-12);
        let logs = [1.091f64.ln(), 1.181f64.ln(), 1.271f64.ln()];
        assert_relative_eq!(wml.skewness, skewness(&logs).unwrap(), epsilon = 1e-12);
        assert_relative_eq!(wml.correlation.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_momentum_table_without_benchmark() {
        let table = momentum_table(
            &decile_returns(),
            None,
            BreakpointPolicy::Krf,
            &SampleWindow::default(),
        )
        .unwrap();
        assert!(table.benchmark.is_none());
        assert!(table.rows.iter().all(|r| r.correlation.is_none()));
        assert!(table.title.contains("KRF"));
    }

    #[test]
    fn test_momentum_table_empty_window() {
        let err = momentum_table(
            &decile_returns(),
            None,
            BreakpointPolicy::Dm,
            &SampleWindow::years(2000, 2001),
        )
        .unwrap_err();
        assert!(matches!(err, SummaryError::Empty(_)));
    }
}
