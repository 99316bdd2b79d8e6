//! CRSP monthly treasury file.

use crate::calendar::{YearMonth, parse_date};
use crate::coerce::coerce_f64;
use crate::columns::{MONTH, YEAR, bonds};
use crate::error::{DataError, Result};
use crate::reader::{self, HeaderIndex, field};
use log::{debug, warn};
use polars::prelude::*;
use std::io::Read;
use std::path::Path;

/// Load the CRSP treasury issue file.
///
/// Expects `KYCRSPID, MCALDT, TMRETNUA, TMTOTOUT`. Quote dates are moved to
/// their month, giving `kycrspid, year, month, ret, me`.
pub fn load_bonds(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let rdr = reader::open(path, true)?;
    parse_bonds(rdr, &reader::source_name(path))
}

/// Parse a CRSP treasury issue file from any reader.
pub fn read_bonds<R: Read>(rdr: R, source: &str) -> Result<DataFrame> {
    parse_bonds(reader::from_reader(rdr, true), source)
}

fn parse_bonds<R: Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<DataFrame> {
    let header = HeaderIndex::new(rdr.headers()?, source);
    let [i_id, i_date, i_ret, i_out] = header.require_all(bonds::RAW)?;

    let mut id = Vec::new();
    let mut year = Vec::new();
    let mut month = Vec::new();
    let mut ret = Vec::new();
    let mut me = Vec::new();
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = record?;
        let issue = field(&record, i_id);
        let Ok(date) = parse_date(field(&record, i_date)) else {
            skipped += 1;
            continue;
        };
        if issue.is_empty() {
            skipped += 1;
            continue;
        }
        let ym = YearMonth::from_date(date);

        id.push(issue.to_string());
        year.push(ym.year);
        month.push(ym.month as i32);
        ret.push(coerce_f64(field(&record, i_ret)));
        me.push(coerce_f64(field(&record, i_out)));
    }

    if skipped > 0 {
        warn!("{source}: skipped {skipped} rows without an issue id or date");
    }
    if id.is_empty() {
        return Err(DataError::Empty(source.to_string()));
    }
    debug!("{source}: loaded {} issue-month rows", id.len());

    Ok(DataFrame::new(vec![
        Series::new(bonds::KYCRSPID.into(), id).into(),
        Series::new(YEAR.into(), year).into(),
        Series::new(MONTH.into(), month).into(),
        Series::new(bonds::RET.into(), ret).into(),
        Series::new(bonds::ME.into(), me).into(),
    ])?)
}
