//! CRSP riskless rate file (T-bill returns).

use crate::calendar::{YearMonth, parse_date};
use crate::coerce::coerce_f64;
use crate::columns::{MONTH, YEAR, riskless};
use crate::error::{DataError, Result};
use crate::reader::{self, HeaderIndex, field};
use log::warn;
use polars::prelude::*;
use std::io::Read;
use std::path::Path;

/// Load the riskless rate file with columns `caldt, t30ret, t90ret`.
pub fn load_riskless(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let rdr = reader::open(path, true)?;
    parse_riskless(rdr, &reader::source_name(path))
}

/// Parse a riskless rate file from any reader.
pub fn read_riskless<R: Read>(rdr: R, source: &str) -> Result<DataFrame> {
    parse_riskless(reader::from_reader(rdr, true), source)
}

fn parse_riskless<R: Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<DataFrame> {
    let header = HeaderIndex::new(rdr.headers()?, source);
    let [i_date, i_t30, i_t90] = header.require_all(riskless::RAW)?;

    let mut year = Vec::new();
    let mut month = Vec::new();
    let mut t30 = Vec::new();
    let mut t90 = Vec::new();
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = record?;
        let Ok(date) = parse_date(field(&record, i_date)) else {
            skipped += 1;
            continue;
        };
        let ym = YearMonth::from_date(date);
        year.push(ym.year);
        month.push(ym.month as i32);
        t30.push(coerce_f64(field(&record, i_t30)));
        t90.push(coerce_f64(field(&record, i_t90)));
    }

    if skipped > 0 {
        warn!("{source}: skipped {skipped} rows without a valid date");
    }
    if year.is_empty() {
        return Err(DataError::Empty(source.to_string()));
    }

    Ok(DataFrame::new(vec![
        Series::new(YEAR.into(), year).into(),
        Series::new(MONTH.into(), month).into(),
        Series::new(riskless::T30RET.into(), t30).into(),
        Series::new(riskless::T90RET.into(), t90).into(),
    ])?)
}
