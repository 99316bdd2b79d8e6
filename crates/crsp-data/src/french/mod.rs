//! Loaders for files from the Kenneth R. French data library.
//!
//! Library CSVs start with a free-text preamble, then a header row, then a
//! monthly block keyed `YYYYMM`. Further blocks (annual factors, equal
//! weighted variants, firm counts) follow after a blank or text line. Only
//! the first monthly block is read.

pub mod deciles;
pub mod factors;

pub use deciles::{BenchmarkLayout, load_decile_benchmark, read_decile_benchmark};
pub use factors::{load_fama_french, read_fama_french};

use crate::calendar::YearMonth;
use crate::error::{DataError, Result};
use crate::reader::field;
use std::io::Read;

/// Sentinel the library uses for missing observations.
pub(crate) const MISSING_SENTINELS: [f64; 2] = [-99.99, -999.0];

/// Header row plus the month-keyed records of the first data block.
#[derive(Debug)]
pub(crate) struct MonthlyBlock {
    pub(crate) header: csv::StringRecord,
    pub(crate) rows: Vec<(YearMonth, csv::StringRecord)>,
}

/// Scan to the first row accepted by `is_header`, then collect rows until the
/// first key that is not `YYYYMM`.
pub(crate) fn first_monthly_block<R: Read>(
    mut rdr: csv::Reader<R>,
    is_header: impl Fn(&csv::StringRecord) -> bool,
    source: &str,
) -> Result<MonthlyBlock> {
    let mut header = None;
    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record?;
        if header.is_none() {
            if is_header(&record) {
                header = Some(record);
            }
            continue;
        }
        match YearMonth::from_yyyymm(field(&record, 0)) {
            Ok(ym) => rows.push((ym, record)),
            Err(_) if rows.is_empty() => continue,
            Err(_) => break,
        }
    }

    let header =
        header.ok_or_else(|| DataError::Parse(format!("{source}: no header row found")))?;
    if rows.is_empty() {
        return Err(DataError::Empty(source.to_string()));
    }

    Ok(MonthlyBlock { header, rows })
}

/// Convert a percent field to a decimal return.
pub(crate) fn percent(raw: &str) -> Option<f64> {
    crate::coerce::coerce_f64(raw)
        .filter(|v| !MISSING_SENTINELS.iter().any(|s| (v - s).abs() < 1e-9))
        .map(|v| v / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::from_reader;

    #[test]
    fn test_first_block_stops_at_annual_section() {
        let data = "\
This file was created using the 202412 CRSP database.
,Mkt-RF,SMB,HML,RF
192607,2.96,-2.56,-2.43,0.22
192608,2.64,-1.17,3.82,0.25

 Annual Factors: January-December
,Mkt-RF,SMB,HML,RF
1927,29.47,-2.04,-4.71,3.12
";
        let block = first_monthly_block(
            from_reader(data.as_bytes(), false),
            |r| r.iter().any(|f| f.eq_ignore_ascii_case("Mkt-RF")),
            "ff",
        )
        .unwrap();

        assert_eq!(block.rows.len(), 2);
        assert_eq!(block.rows[1].0, YearMonth::new(1926, 8).unwrap());
    }

    #[test]
    fn test_percent_handles_sentinels() {
        assert_eq!(percent("2.5"), Some(0.025));
        assert_eq!(percent("-99.99"), None);
        assert_eq!(percent(""), None);
    }
}
