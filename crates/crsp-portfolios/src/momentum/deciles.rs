//! Momentum decile assignment.
//!
//! Every month the ranking returns are split into `buckets` groups by
//! quantile breakpoints. Two breakpoint policies are produced side by side:
//!
//! - **DM**: breakpoints from every security in the month;
//! - **KRF**: breakpoints from the reference exchange (NYSE) only, applied to
//!   every security in the month.
//!
//! Breakpoints are the `k / buckets` quantiles with linear interpolation
//! between order statistics. Repeated breakpoints collapse, so a month with
//! heavy ties ends up with fewer than `buckets` groups. Intervals are closed
//! on the right, and the lowest interval is also closed on the left.
//!
//! A month whose reference subset has fewer than `min_reference` ranking
//! returns gets no labels under either policy.

use crate::columns::momentum::{DM_DECILE, KRF_DECILE, RANKING_RET};
use crate::columns::{MONTH, YEAR};
use crate::construction::{Construction, validate_columns};
use crate::error::{PortfolioError, Result};
use crate::frame::{f64_values, i32_values, i64_values};
use crsp_data::Exchange;
use crsp_data::columns::stocks::EXCHCD;
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PANEL_COLUMNS: &[&str] = &[YEAR, MONTH, EXCHCD, RANKING_RET];

/// Treatment of values outside the outermost breakpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRange {
    /// Leave the value unlabelled
    #[default]
    Exclude,
    /// Put values below the lowest edge in the bottom bucket and values above
    /// the highest edge in the top bucket
    Clamp,
}

/// Configuration for decile assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecileConfig {
    /// Number of quantile buckets (default: 10)
    pub buckets: usize,
    /// Minimum reference-exchange observations for a month to be labelled (default: 10)
    pub min_reference: usize,
    /// Exchange whose securities set the KRF breakpoints (default: NYSE)
    pub reference_exchange: Exchange,
    /// Out-of-range policy for KRF labels (default: exclude)
    pub out_of_range: OutOfRange,
}

impl Default for DecileConfig {
    fn default() -> Self {
        Self {
            buckets: 10,
            min_reference: 10,
            reference_exchange: Exchange::Nyse,
            out_of_range: OutOfRange::Exclude,
        }
    }
}

/// One security in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthObservation {
    /// Ranking return
    pub ranking_ret: Option<f64>,
    /// CRSP exchange code
    pub exchange_code: Option<i64>,
}

/// Labels for one security in one month, 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecileAssignment {
    /// Label under universe-wide breakpoints
    pub dm: Option<i32>,
    /// Label under reference-exchange breakpoints
    pub krf: Option<i32>,
}

/// Linear interpolation that is exact at both ends.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Quantile breakpoints at `0, 1/buckets, …, 1`, duplicates removed.
///
/// NaN values are ignored. Returns an empty vector when fewer than two
/// distinct edges remain, in which case nothing can be labelled.
///
/// ```
/// use crsp_portfolios::quantile_breakpoints;
///
/// let edges = quantile_breakpoints(&[1.0, 2.0, 3.0, 4.0, 5.0], 4);
/// assert_eq!(edges, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!(quantile_breakpoints(&[0.5, 0.5, 0.5], 10).is_empty());
/// ```
pub fn quantile_breakpoints(values: &[f64], buckets: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() || buckets == 0 {
        return Vec::new();
    }
    sorted.sort_by(f64::total_cmp);

    let top = sorted.len() - 1;
    let mut edges: Vec<f64> = (0..=buckets)
        .map(|k| {
            let pos = top as f64 * k as f64 / buckets as f64;
            let lo = (pos.floor() as usize).min(top);
            let hi = (lo + 1).min(top);
            lerp(sorted[lo], sorted[hi], pos - lo as f64)
        })
        .collect();
    edges.dedup();

    if edges.len() < 2 { Vec::new() } else { edges }
}

/// 1-based bucket of `x` given ascending `edges`.
///
/// Bucket `i` is `(edges[i-1], edges[i]]`, with bucket 1 also containing
/// `edges[0]`.
pub fn assign_bucket(x: Option<f64>, edges: &[f64], out_of_range: OutOfRange) -> Option<i32> {
    let x = x.filter(|v| !v.is_nan())?;
    let (&first, &last) = (edges.first()?, edges.last()?);
    let top = edges.len().checked_sub(1).filter(|&n| n > 0)?;

    if x < first || x > last {
        return match out_of_range {
            OutOfRange::Exclude => None,
            OutOfRange::Clamp if x < first => Some(1),
            OutOfRange::Clamp => i32::try_from(top).ok(),
        };
    }
    if x == first {
        return Some(1);
    }
    // First edge >= x; lies in 1..=top because first < x <= last.
    i32::try_from(edges.partition_point(|e| *e < x)).ok()
}

/// Assign DM and KRF labels to every observation of a single month.
pub fn assign_month(observations: &[MonthObservation], config: &DecileConfig) -> Vec<DecileAssignment> {
    let reference_code = config.reference_exchange.code();
    let reference: Vec<f64> = observations
        .iter()
        .filter(|o| o.exchange_code == Some(reference_code))
        .filter_map(|o| o.ranking_ret)
        .filter(|v| !v.is_nan())
        .collect();

    if reference.len() < config.min_reference {
        return vec![DecileAssignment::default(); observations.len()];
    }

    let universe: Vec<f64> = observations.iter().filter_map(|o| o.ranking_ret).collect();
    let dm_edges = quantile_breakpoints(&universe, config.buckets);
    let krf_edges = quantile_breakpoints(&reference, config.buckets);

    observations
        .iter()
        .map(|o| DecileAssignment {
            dm: assign_bucket(o.ranking_ret, &dm_edges, OutOfRange::Exclude),
            krf: assign_bucket(o.ranking_ret, &krf_edges, config.out_of_range),
        })
        .collect()
}

/// Add `dm_decile` and `krf_decile` to a ranking panel.
///
/// Row order is preserved. Rows without a year or month are left unlabelled.
pub fn assign_deciles(panel: &DataFrame, config: &DecileConfig) -> Result<DataFrame> {
    validate_columns(panel, PANEL_COLUMNS, "momentum_deciles")?;
    if config.buckets == 0 {
        return Err(PortfolioError::InvalidConfig(
            "decile assignment needs at least one bucket".to_string(),
        ));
    }

    let year = i32_values(panel, YEAR)?;
    let month = i32_values(panel, MONTH)?;
    let exchange = i64_values(panel, EXCHCD)?;
    let ranking = f64_values(panel, RANKING_RET)?;

    let mut months: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
    for (i, key) in year.iter().zip(&month).enumerate() {
        if let (Some(y), Some(m)) = key {
            months.entry((*y, *m)).or_default().push(i);
        }
    }

    let mut dm = vec![None; panel.height()];
    let mut krf = vec![None; panel.height()];
    let mut unlabelled = 0usize;
    for rows in months.values() {
        let observations: Vec<MonthObservation> = rows
            .iter()
            .map(|&i| MonthObservation {
                ranking_ret: ranking[i],
                exchange_code: exchange[i],
            })
            .collect();
        let labels = assign_month(&observations, config);
        if labels.iter().all(|l| l.dm.is_none() && l.krf.is_none()) {
            unlabelled += 1;
        }
        for (&i, label) in rows.iter().zip(labels) {
            dm[i] = label.dm;
            krf[i] = label.krf;
        }
    }
    debug!(
        "momentum deciles: {} months, {} without labels",
        months.len(),
        unlabelled
    );

    let mut out = panel.clone();
    out.with_column(Series::new(DM_DECILE.into(), dm))?;
    out.with_column(Series::new(KRF_DECILE.into(), krf))?;
    Ok(out)
}

/// Decile assignment as a [`Construction`] over the ranking panel
#[derive(Debug, Default)]
pub struct MomentumDeciles {
    config: DecileConfig,
}

impl MomentumDeciles {
    /// Create with an explicit configuration.
    pub fn with_config(config: DecileConfig) -> Self {
        Self { config }
    }
}

impl Construction for MomentumDeciles {
    fn name(&self) -> &str {
        "momentum_deciles"
    }

    fn required_columns(&self) -> &[&str] {
        PANEL_COLUMNS
    }

    fn build(&self, data: &DataFrame) -> Result<DataFrame> {
        assign_deciles(data, &self.config)
    }
}
