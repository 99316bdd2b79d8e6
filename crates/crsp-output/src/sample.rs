//! Sample windows over monthly series.

use crsp_data::YearMonth;
use crsp_data::columns::{MONTH, YEAR};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed range of months; an open bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// First month included.
    pub start: Option<YearMonth>,
    /// Last month included.
    pub end: Option<YearMonth>,
}

impl SampleWindow {
    /// Window with both bounds.
    pub const fn between(start: YearMonth, end: YearMonth) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Window starting at `start` with no end.
    pub const fn starting(start: YearMonth) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Calendar years `first..=last`, January to December.
    pub const fn years(first: i32, last: i32) -> Self {
        Self::between(
            YearMonth {
                year: first,
                month: 1,
            },
            YearMonth {
                year: last,
                month: 12,
            },
        )
    }

    /// Whether `month` falls inside the window.
    pub fn contains(&self, month: YearMonth) -> bool {
        self.start.is_none_or(|s| month >= s) && self.end.is_none_or(|e| month <= e)
    }

    /// Restrict a frame keyed by `year, month` to the window.
    pub fn apply(&self, frame: LazyFrame) -> LazyFrame {
        let key = || col(YEAR).cast(DataType::Int32) * lit(100) + col(MONTH).cast(DataType::Int32);
        let frame = match self.start {
            Some(start) => frame.filter(key().gt_eq(lit(start.key()))),
            None => frame,
        };
        match self.end {
            Some(end) => frame.filter(key().lt_eq(lit(end.key()))),
            None => frame,
        }
    }
}

impl fmt::Display for SampleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(s), Some(e)) => write!(f, "{s} to {e}"),
            (Some(s), None) => write!(f, "from {s}"),
            (None, Some(e)) => write!(f, "through {e}"),
            (None, None) => write!(f, "full sample"),
        }
    }
}
