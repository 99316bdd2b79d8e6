//! Benchmark momentum decile returns.
//!
//! Two layouts are accepted:
//! - long: one row per month and decile with `year, month, decile, ret` (or
//!   `date, decile, ret`), decimal returns, as distributed with the
//!   Daniel-Moskowitz momentum data;
//! - wide: the library's `10_Portfolios_Prior_12_2.CSV`, a `YYYYMM` key and
//!   ten percent-valued columns from `Lo PRIOR` to `Hi PRIOR`.

use super::{first_monthly_block, percent};
use crate::calendar::{YearMonth, parse_date};
use crate::coerce::{coerce_f64, coerce_i64};
use crate::columns::{MONTH, YEAR, benchmark};
use crate::error::{DataError, Result};
use crate::reader::{self, HeaderIndex, field};
use log::{debug, warn};
use polars::prelude::*;
use std::path::Path;

/// Number of portfolios in a decile benchmark file.
pub const DECILES: usize = 10;

/// Layout of a benchmark file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkLayout {
    /// One row per (month, decile)
    Long,
    /// One row per month, one column per decile
    Wide,
}

impl BenchmarkLayout {
    /// Guess the layout from the file contents: a `decile` header means long.
    pub fn detect(contents: &str) -> Self {
        let first = contents
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if first.split(',').any(|h| h.trim() == benchmark::DECILE) {
            Self::Long
        } else {
            Self::Wide
        }
    }
}

/// Load a benchmark decile file, detecting its layout.
///
/// Returns a long frame `year, month, decile, ret` with decimal returns.
pub fn load_decile_benchmark(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    read_decile_benchmark(&contents, &reader::source_name(path))
}

/// Parse benchmark decile returns from an in-memory file.
pub fn read_decile_benchmark(contents: &str, source: &str) -> Result<DataFrame> {
    let layout = BenchmarkLayout::detect(contents);
    debug!("{source}: parsing {layout:?} decile benchmark");
    let rows = match layout {
        BenchmarkLayout::Long => parse_long(contents, source)?,
        BenchmarkLayout::Wide => parse_wide(contents, source)?,
    };
    if rows.is_empty() {
        return Err(DataError::Empty(source.to_string()));
    }

    let year: Vec<i32> = rows.iter().map(|r| r.0.year).collect();
    let month: Vec<i32> = rows.iter().map(|r| r.0.month as i32).collect();
    let decile: Vec<i32> = rows.iter().map(|r| r.1).collect();
    let ret: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();

    Ok(DataFrame::new(vec![
        Series::new(YEAR.into(), year).into(),
        Series::new(MONTH.into(), month).into(),
        Series::new(benchmark::DECILE.into(), decile).into(),
        Series::new(benchmark::RET.into(), ret).into(),
    ])?)
}

type BenchmarkRow = (YearMonth, i32, Option<f64>);

fn parse_long(contents: &str, source: &str) -> Result<Vec<BenchmarkRow>> {
    let mut rdr = reader::from_reader(contents.as_bytes(), true);
    let header = HeaderIndex::new(rdr.headers()?, source);
    let i_decile = header.require(benchmark::DECILE)?;
    let i_ret = header.require(benchmark::RET)?;
    let month_key = match (header.find(YEAR), header.find(MONTH)) {
        (Some(y), Some(m)) => MonthKey::Split(y, m),
        _ => MonthKey::Date(header.require("date")?),
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let ym = month_key.resolve(&record);
        let decile = coerce_i64(field(&record, i_decile))
            .filter(|d| (1..=DECILES as i64).contains(d))
            .map(|d| d as i32);
        match (ym, decile) {
            (Some(ym), Some(decile)) => {
                rows.push((ym, decile, coerce_f64(field(&record, i_ret))));
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("{source}: skipped {skipped} rows without a month or a decile in 1..=10");
    }
    Ok(rows)
}

#[derive(Debug, Clone, Copy)]
enum MonthKey {
    Split(usize, usize),
    Date(usize),
}

impl MonthKey {
    fn resolve(&self, record: &csv::StringRecord) -> Option<YearMonth> {
        match *self {
            Self::Split(y, m) => {
                let year = coerce_i64(field(record, y))?;
                let month = coerce_i64(field(record, m))?;
                YearMonth::new(i32::try_from(year).ok()?, u32::try_from(month).ok()?).ok()
            }
            Self::Date(d) => {
                let raw = field(record, d);
                YearMonth::from_yyyymm(raw)
                    .ok()
                    .or_else(|| parse_date(raw).ok().map(YearMonth::from_date))
            }
        }
    }
}

fn parse_wide(contents: &str, source: &str) -> Result<Vec<BenchmarkRow>> {
    let rdr = reader::from_reader(contents.as_bytes(), false);
    let block = first_monthly_block(
        rdr,
        |r| {
            r.len() > DECILES
                && r.iter()
                    .skip(1)
                    .take(DECILES)
                    .all(|f| !f.is_empty() && coerce_f64(f).is_none())
        },
        source,
    )?;

    let mut rows = Vec::with_capacity(block.rows.len() * DECILES);
    for (ym, record) in &block.rows {
        for decile in 1..=DECILES {
            rows.push((*ym, decile as i32, percent(field(record, decile))));
        }
    }
    Ok(rows)
}
