//! Fama-French research factors (`F-F_Research_Data_Factors.CSV`).

use super::{first_monthly_block, percent};
use crate::columns::{MONTH, YEAR, french};
use crate::error::Result;
use crate::reader::{self, HeaderIndex, field};
use log::debug;
use polars::prelude::*;
use std::io::Read;
use std::path::Path;

/// Load monthly Fama-French factors.
///
/// Returns `year, month, mkt_rf, smb, hml, rf` with values converted from
/// percent to decimals.
pub fn load_fama_french(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let rdr = reader::open(path, false)?;
    parse_fama_french(rdr, &reader::source_name(path))
}

/// Parse Fama-French factors from any reader.
pub fn read_fama_french<R: Read>(rdr: R, source: &str) -> Result<DataFrame> {
    parse_fama_french(reader::from_reader(rdr, false), source)
}

fn parse_fama_french<R: Read>(rdr: csv::Reader<R>, source: &str) -> Result<DataFrame> {
    let block = first_monthly_block(
        rdr,
        |r| r.iter().any(|f| f.eq_ignore_ascii_case("Mkt-RF")),
        source,
    )?;
    let header = HeaderIndex::new(&block.header, source);
    let [i_mkt, i_smb, i_hml, i_rf] = header.require_all(["Mkt-RF", "SMB", "HML", "RF"])?;

    let n = block.rows.len();
    let mut year = Vec::with_capacity(n);
    let mut month = Vec::with_capacity(n);
    let mut mkt_rf = Vec::with_capacity(n);
    let mut smb = Vec::with_capacity(n);
    let mut hml = Vec::with_capacity(n);
    let mut rf = Vec::with_capacity(n);

    for (ym, record) in &block.rows {
        year.push(ym.year);
        month.push(ym.month as i32);
        mkt_rf.push(percent(field(record, i_mkt)));
        smb.push(percent(field(record, i_smb)));
        hml.push(percent(field(record, i_hml)));
        rf.push(percent(field(record, i_rf)));
    }
    debug!("{source}: loaded {n} monthly factor rows");

    Ok(DataFrame::new(vec![
        Series::new(YEAR.into(), year).into(),
        Series::new(MONTH.into(), month).into(),
        Series::new(french::MKT_RF.into(), mkt_rf).into(),
        Series::new(french::SMB.into(), smb).into(),
        Series::new(french::HML.into(), hml).into(),
        Series::new(french::RF.into(), rf).into(),
    ])?)
}
