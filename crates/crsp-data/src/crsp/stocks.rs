//! CRSP monthly stock file.

use crate::calendar::{YearMonth, parse_date};
use crate::coerce::{coerce_f64, coerce_i64};
use crate::columns::{MONTH, YEAR, stocks};
use crate::error::{DataError, Result};
use crate::reader::{self, HeaderIndex, field};
use log::{debug, warn};
use polars::prelude::*;
use std::io::Read;
use std::path::Path;

/// Load the CRSP monthly stock file.
///
/// Expects the WRDS columns `PERMNO, date, SHRCD, EXCHCD, RET, DLRET, PRC,
/// SHROUT`. Returns a frame with columns `permno, year, month, shrcd, exchcd,
/// ret, dlret, prc, shrout`; every field except the identifier and month key
/// is nullable.
pub fn load_stocks(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let rdr = reader::open(path, true)?;
    parse_stocks(rdr, &reader::source_name(path))
}

/// Parse a CRSP monthly stock file from any reader.
pub fn read_stocks<R: Read>(rdr: R, source: &str) -> Result<DataFrame> {
    parse_stocks(reader::from_reader(rdr, true), source)
}

fn parse_stocks<R: Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<DataFrame> {
    let header = HeaderIndex::new(rdr.headers()?, source);
    let [i_permno, i_date, i_shrcd, i_exchcd, i_ret, i_dlret, i_prc, i_shrout] =
        header.require_all(stocks::RAW)?;

    let mut permno = Vec::new();
    let mut year = Vec::new();
    let mut month = Vec::new();
    let mut shrcd = Vec::new();
    let mut exchcd = Vec::new();
    let mut ret = Vec::new();
    let mut dlret = Vec::new();
    let mut prc = Vec::new();
    let mut shrout = Vec::new();
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = record?;
        let Some(id) = coerce_i64(field(&record, i_permno)) else {
            skipped += 1;
            continue;
        };
        let Ok(date) = parse_date(field(&record, i_date)) else {
            skipped += 1;
            continue;
        };
        let ym = YearMonth::from_date(date);

        permno.push(id);
        year.push(ym.year);
        month.push(ym.month as i32);
        shrcd.push(coerce_i64(field(&record, i_shrcd)));
        exchcd.push(coerce_i64(field(&record, i_exchcd)));
        ret.push(coerce_f64(field(&record, i_ret)));
        dlret.push(coerce_f64(field(&record, i_dlret)));
        prc.push(coerce_f64(field(&record, i_prc)));
        shrout.push(coerce_f64(field(&record, i_shrout)));
    }

    if skipped > 0 {
        warn!("{source}: skipped {skipped} rows without a valid PERMNO or date");
    }
    if permno.is_empty() {
        return Err(DataError::Empty(source.to_string()));
    }
    debug!("{source}: loaded {} stock-month rows", permno.len());

    let df = DataFrame::new(vec![
        Series::new(stocks::PERMNO.into(), permno).into(),
        Series::new(YEAR.into(), year).into(),
        Series::new(MONTH.into(), month).into(),
        Series::new(stocks::SHRCD.into(), shrcd).into(),
        Series::new(stocks::EXCHCD.into(), exchcd).into(),
        Series::new(stocks::RET.into(), ret).into(),
        Series::new(stocks::DLRET.into(), dlret).into(),
        Series::new(stocks::PRC.into(), prc).into(),
        Series::new(stocks::SHROUT.into(), shrout).into(),
    ])?;

    Ok(df)
}
