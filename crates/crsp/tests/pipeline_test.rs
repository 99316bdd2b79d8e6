//! The three pipelines over a synthetic 1926-1928 sample.

use approx::assert_relative_eq;
use crsp::output::{SampleWindow, WML_LABEL};
use crsp::{PipelineConfig, run_market, run_momentum, run_risk_parity};
use polars::prelude::*;

const MONTHS: usize = 36;
const STOCKS: i64 = 12;

fn calendar() -> (Vec<i32>, Vec<i32>) {
    (0..MONTHS)
        .map(|t| (1926 + (t / 12) as i32, (t % 12) as i32 + 1))
        .unzip()
}

/// Twelve NYSE common stocks trading every month.
fn stocks() -> DataFrame {
    let mut permno = Vec::new();
    let mut year = Vec::new();
    let mut month = Vec::new();
    let mut ret = Vec::new();
    let mut prc = Vec::new();
    for id in 1..=STOCKS {
        for t in 0..MONTHS {
            permno.push(10_000 + id);
            year.push(1926 + (t / 12) as i32);
            month.push((t % 12) as i32 + 1);
            let drift = (id as f64 - 6.0) / 1000.0;
            let noise = (((id as usize * 7 + t * 13) % 11) as f64 - 5.0) / 400.0;
            ret.push(Some(drift + noise));
            prc.push(Some(-(10.0 + id as f64)));
        }
    }
    let n = permno.len();
    df! {
        "permno" => permno,
        "year" => year,
        "month" => month,
        "shrcd" => vec![Some(10i64); n],
        "exchcd" => vec![Some(1i64); n],
        "ret" => ret,
        "dlret" => vec![None::<f64>; n],
        "prc" => prc,
        "shrout" => vec![Some(1_000.0); n],
    }
    .unwrap()
}

fn bonds() -> DataFrame {
    let mut id = Vec::new();
    let mut year = Vec::new();
    let mut month = Vec::new();
    let mut ret = Vec::new();
    let mut me = Vec::new();
    for (k, issue) in ["19300115.1", "19400115.1"].iter().enumerate() {
        for t in 0..MONTHS {
            id.push(issue.to_string());
            year.push(1926 + (t / 12) as i32);
            month.push((t % 12) as i32 + 1);
            ret.push(Some(0.003 + (((t * 5 + k) % 7) as f64 - 3.0) / 2000.0));
            me.push(Some(1_000.0 + 10.0 * t as f64 + 500.0 * k as f64));
        }
    }
    df! {
        "kycrspid" => id,
        "year" => year,
        "month" => month,
        "ret" => ret,
        "me" => me,
    }
    .unwrap()
}

fn riskless() -> DataFrame {
    let (year, month) = calendar();
    df! {
        "year" => year,
        "month" => month,
        "t30ret" => vec![Some(0.002); MONTHS],
        "t90ret" => vec![Some(0.0025); MONTHS],
    }
    .unwrap()
}

fn factors() -> DataFrame {
    let (year, month) = calendar();
    let mkt_rf: Vec<f64> = (0..MONTHS)
        .map(|t| ((t * 3 % 5) as f64 - 2.0) / 100.0)
        .collect();
    df! {
        "year" => year,
        "month" => month,
        "mkt_rf" => mkt_rf,
        "smb" => vec![0.0; MONTHS],
        "hml" => vec![0.0; MONTHS],
        "rf" => vec![0.002; MONTHS],
    }
    .unwrap()
}

#[test]
fn test_run_market() {
    let run = run_market(&stocks(), &factors(), &PipelineConfig::default()).unwrap();
    // The first month has no lagged capitalisation.
    assert_eq!(run.monthly.height(), MONTHS - 1);
    // 1926-07 .. 1928-12
    assert_eq!(run.comparison.observations, 30);
    assert_eq!(run.table.rows.len(), 2);
    assert_eq!(run.table.period_start.to_string(), "1926-07");
}

#[test]
fn test_run_risk_parity() {
    let mut config = PipelineConfig::default();
    config.risk_parity.vol_window = 3;
    config.samples.risk_parity = SampleWindow::default();

    let run = run_risk_parity(&stocks(), &bonds(), &riskless(), &config).unwrap();
    // Bonds cover every month, stocks all but the first.
    assert_eq!(run.universe.height(), MONTHS);
    assert_eq!(run.portfolios.height(), MONTHS);
    assert_eq!(run.table.rows.len(), 6);

    let stocks_row = &run.table.rows[0];
    assert_eq!(stocks_row.observations, MONTHS - 1);
    let levered = &run.table.rows[5];
    assert!(levered.observations > 0 && levered.observations < stocks_row.observations);
    assert!(levered.annualized_volatility.is_finite());
}

#[test]
fn test_run_momentum() {
    let config = PipelineConfig::default();
    let first = run_momentum(&stocks(), &factors(), None, None, &config).unwrap();
    let benchmark = first
        .returns
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

    let run = run_momentum(&stocks(), &factors(), Some(&benchmark), None, &config).unwrap();
    // 1927-01 .. 1928-12, twelve names, ten deciles each month.
    assert_eq!(run.panel.height(), 24 * STOCKS as usize);
    assert_eq!(run.returns.height(), 24 * 10);

    let dm = run.dm_table.unwrap();
    assert_eq!(dm.rows.len(), 11);
    assert_eq!(dm.rows[10].name, WML_LABEL);
    assert_relative_eq!(dm.rows[0].correlation.unwrap(), 1.0, epsilon = 1e-9);

    let krf = run.krf_table.unwrap();
    assert!(krf.benchmark.is_none());
    // All names are NYSE, so both policies form the same portfolios.
    assert_relative_eq!(
        krf.rows[4].annualized_mean,
        dm.rows[4].annualized_mean,
        epsilon = 1e-12
    );
}

#[test]
fn test_run_momentum_outside_sample() {
    let mut config = PipelineConfig::default();
    config.samples.momentum = SampleWindow::years(1990, 2000);
    let run = run_momentum(&stocks(), &factors(), None, None, &config).unwrap();
    assert!(run.dm_table.is_none());
    assert!(run.krf_table.is_none());
    assert!(run.returns.height() > 0);
}

#[test]
fn test_run_momentum_single_ranked_month() {
    // Twelve months of history rank only 1927-01.
    let stocks = stocks()
        .lazy()
        .filter((col("year") * lit(100) + col("month")).lt_eq(lit(192701)))
        .collect()
        .unwrap();
    let factors = factors()
        .lazy()
        .filter(col("year").eq(lit(1927)).and(col("month").eq(lit(1))))
        .collect()
        .unwrap();
    assert_eq!(factors.height(), 1);

    let run = run_momentum(&stocks, &factors, None, None, &PipelineConfig::default()).unwrap();
    assert_eq!(run.panel.height(), STOCKS as usize);
    assert_eq!(run.returns.height(), 10);

    let dm = run.dm_table.unwrap();
    assert_eq!(dm.rows.len(), 11);
    assert_eq!(dm.period_start, dm.period_end);
    for row in &dm.rows {
        assert_eq!(row.observations, 1);
        assert!(row.annualized_mean.is_finite());
        assert!(row.annualized_volatility.is_nan());
        assert!(row.sharpe.is_nan());
    }
    assert!(run.krf_table.is_some());
}
