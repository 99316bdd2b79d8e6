//! End-to-end pipelines from loaded frames to summary tables.

use crate::config::PipelineConfig;
use crate::error::Result;
use crsp_output::{
    BreakpointPolicy, PerformanceTable, ReplicationComparison, SummaryError, market_comparison,
    market_table, momentum_table, risk_parity_table,
};
use crsp_portfolios::{
    assign_deciles, bond_returns, decile_returns, excess_universe, market_returns, ranking_panel,
    risk_parity,
};
use log::{info, warn};
use polars::prelude::DataFrame;

/// Output of [`run_market`].
#[derive(Debug, Clone)]
pub struct MarketRun {
    /// Monthly stock market returns
    pub monthly: DataFrame,
    /// CRSP VW excess vs Fama-French Mkt-RF statistics
    pub table: PerformanceTable,
    /// Replication accuracy against Mkt-RF
    pub comparison: ReplicationComparison,
}

/// Stock market returns and their agreement with the Fama-French market factor.
pub fn run_market(
    stocks: &DataFrame,
    factors: &DataFrame,
    config: &PipelineConfig,
) -> Result<MarketRun> {
    let monthly = market_returns(stocks, &config.market)?;
    info!("stock market returns: {} months", monthly.height());

    let window = &config.samples.market;
    let table = market_table(&monthly, factors, window)?;
    let comparison = market_comparison(&monthly, factors, window)?;
    Ok(MarketRun {
        monthly,
        table,
        comparison,
    })
}

/// Output of [`run_risk_parity`].
#[derive(Debug, Clone)]
pub struct RiskParityRun {
    /// Stock and bond value-weighted returns with excess returns
    pub universe: DataFrame,
    /// Value-weighted, 60/40 and risk-parity portfolio returns
    pub portfolios: DataFrame,
    /// Excess-return statistics over the risk-parity sample
    pub table: PerformanceTable,
}

/// Stock/bond universe, allocation portfolios and their statistics.
pub fn run_risk_parity(
    stocks: &DataFrame,
    bonds: &DataFrame,
    riskless: &DataFrame,
    config: &PipelineConfig,
) -> Result<RiskParityRun> {
    let market = market_returns(stocks, &config.market)?;
    let bond = bond_returns(bonds, &config.bonds)?;
    let universe = excess_universe(&market, &bond, riskless)?;
    info!("stock/bond universe: {} months", universe.height());

    let portfolios = risk_parity(&universe, &config.risk_parity)?;
    let table = risk_parity_table(&portfolios, &config.samples.risk_parity)?;
    Ok(RiskParityRun {
        universe,
        portfolios,
        table,
    })
}

/// Output of [`run_momentum`].
#[derive(Debug, Clone)]
pub struct MomentumRun {
    /// Ranked security-months with DM and KRF decile labels
    pub panel: DataFrame,
    /// Decile portfolio returns under both policies
    pub returns: DataFrame,
    /// DM decile statistics; `None` when the sample window has no month
    pub dm_table: Option<PerformanceTable>,
    /// KRF decile statistics; `None` when the sample window has no month
    pub krf_table: Option<PerformanceTable>,
}

fn policy_table(
    returns: &DataFrame,
    benchmark: Option<&DataFrame>,
    policy: BreakpointPolicy,
    config: &PipelineConfig,
) -> Result<Option<PerformanceTable>> {
    match momentum_table(returns, benchmark, policy, &config.samples.momentum) {
        Ok(table) => Ok(Some(table)),
        Err(SummaryError::Empty(what)) => {
            warn!("skipping {what}: no month in {}", config.samples.momentum);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Momentum ranking, decile assignment, decile returns and statistics.
///
/// Benchmarks are long frames (`year, month, decile, ret`); when given they
/// fill the correlation column of the matching policy's table.
pub fn run_momentum(
    stocks: &DataFrame,
    factors: &DataFrame,
    dm_benchmark: Option<&DataFrame>,
    krf_benchmark: Option<&DataFrame>,
    config: &PipelineConfig,
) -> Result<MomentumRun> {
    let ranked = ranking_panel(stocks, &config.ranking)?;
    info!("momentum ranking panel: {} security-months", ranked.height());

    let panel = assign_deciles(&ranked, &config.deciles)?;
    let returns = decile_returns(&panel, factors, &config.decile_returns)?;
    info!("momentum decile returns: {} rows", returns.height());

    let dm_table = policy_table(&returns, dm_benchmark, BreakpointPolicy::Dm, config)?;
    let krf_table = policy_table(&returns, krf_benchmark, BreakpointPolicy::Krf, config)?;
    Ok(MomentumRun {
        panel,
        returns,
        dm_table,
        krf_table,
    })
}
