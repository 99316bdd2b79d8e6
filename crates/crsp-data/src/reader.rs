//! Shared CSV plumbing for the loaders.

use crate::error::{DataError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Open a CSV file with the settings every loader uses.
pub(crate) fn open(path: &Path, has_headers: bool) -> Result<csv::Reader<File>> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?)
}

/// Wrap an arbitrary reader with the loader settings.
pub(crate) fn from_reader<R: Read>(rdr: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

/// Human-readable name for error messages.
pub(crate) fn source_name(path: &Path) -> String {
    path.display().to_string()
}

/// Case-insensitive lookup of header positions.
#[derive(Debug)]
pub(crate) struct HeaderIndex {
    names: Vec<String>,
    source: String,
}

impl HeaderIndex {
    pub(crate) fn new(record: &csv::StringRecord, source: &str) -> Self {
        Self {
            names: record.iter().map(|h| h.trim().to_ascii_lowercase()).collect(),
            source: source.to_string(),
        }
    }

    /// Position of a column, if present.
    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        let name = name.to_ascii_lowercase();
        self.names.iter().position(|h| *h == name)
    }

    /// Position of a column that must be present.
    pub(crate) fn require(&self, name: &str) -> Result<usize> {
        self.find(name).ok_or_else(|| DataError::MissingColumn {
            column: name.to_string(),
            source_name: self.source.clone(),
        })
    }

    /// Positions of several required columns, in order.
    pub(crate) fn require_all<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N]> {
        let mut out = [0usize; N];
        for (slot, name) in out.iter_mut().zip(names) {
            *slot = self.require(name)?;
        }
        Ok(out)
    }
}

/// Field at `idx`, or the empty string for short rows.
pub(crate) fn field(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let header = csv::StringRecord::from(vec!["PERMNO", " date ", "Ret"]);
        let index = HeaderIndex::new(&header, "test.csv");

        assert_eq!(index.find("permno"), Some(0));
        assert_eq!(index.find("DATE"), Some(1));
        assert_eq!(index.require_all(["ret", "permno"]).unwrap(), [2, 0]);
    }

    #[test]
    fn test_missing_column_reports_source() {
        let header = csv::StringRecord::from(vec!["PERMNO"]);
        let index = HeaderIndex::new(&header, "stocks.csv");

        match index.require("SHROUT") {
            Err(DataError::MissingColumn {
                column,
                source_name,
            }) => {
                assert_eq!(column, "SHROUT");
                assert_eq!(source_name, "stocks.csv");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
