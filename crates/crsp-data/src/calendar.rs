//! Month keys and date parsing.
//!
//! Every dataset in the workspace is monthly, so rows are keyed by
//! [`YearMonth`] rather than by calendar date. Dates in the raw files are only
//! parsed far enough to recover the year and month.

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of year, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Create a month key, validating the month number.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DataError::InvalidYearMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    /// Parse the `YYYYMM` keys used by Kenneth French data files.
    ///
    /// ```
    /// use crsp_data::YearMonth;
    ///
    /// let ym = YearMonth::from_yyyymm("192607").unwrap();
    /// assert_eq!((ym.year, ym.month), (1926, 7));
    /// assert!(YearMonth::from_yyyymm("1926").is_err());
    /// ```
    pub fn from_yyyymm(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.len() != 6 || !key.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidYearMonth(key.to_string()));
        }
        let year: i32 = key[..4]
            .parse()
            .map_err(|_| DataError::InvalidYearMonth(key.to_string()))?;
        let month: u32 = key[4..]
            .parse()
            .map_err(|_| DataError::InvalidYearMonth(key.to_string()))?;
        Self::new(year, month)
    }

    /// Month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Last calendar day of the month.
    pub fn month_end(&self) -> NaiveDate {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The following month.
    pub const fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month.
    pub const fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Sortable integer key `year * 100 + month`, e.g. `192607`.
    pub const fn key(&self) -> i32 {
        self.year * 100 + self.month as i32
    }

    /// Whether this month lies in the closed range `[start, end]`.
    pub fn within(&self, start: Self, end: Self) -> bool {
        *self >= start && *self <= end
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a date in one of the layouts found in WRDS exports.
///
/// Accepted: `YYYY-MM-DD`, `YYYYMMDD`, `MM/DD/YYYY`, `YYYY/MM/DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%Y/%m/%d"];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| DataError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1926-01-30", 1926, 1, 30)]
    #[case("19260130", 1926, 1, 30)]
    #[case("01/30/1926", 1926, 1, 30)]
    #[case("1926/01/30", 1926, 1, 30)]
    #[case(" 2024-12-31 ", 2024, 12, 31)]
    fn test_parse_date_layouts(#[case] raw: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        assert_eq!(
            parse_date(raw).unwrap(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(parse_date("C"), Err(DataError::InvalidDate(_))));
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_month_end() {
        let feb_leap = YearMonth::new(2024, 2).unwrap();
        assert_eq!(
            feb_leap.month_end(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        let dec = YearMonth::new(1926, 12).unwrap();
        assert_eq!(dec.month_end(), NaiveDate::from_ymd_opt(1926, 12, 31).unwrap());
    }

    #[test]
    fn test_next_prev_wrap_year() {
        let dec = YearMonth::new(1999, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2000, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_ordering_and_display() {
        let a = YearMonth::new(1926, 7).unwrap();
        let b = YearMonth::new(1927, 1).unwrap();
        assert!(a < b);
        assert!(a.within(a, b));
        assert!(!b.next().within(a, b));
        assert_eq!(a.to_string(), "1926-07");
        assert_eq!(a.key(), 192607);
    }

    #[test]
    fn test_invalid_month() {
        assert!(YearMonth::new(2000, 13).is_err());
        assert!(YearMonth::from_yyyymm("192613").is_err());
    }
}
