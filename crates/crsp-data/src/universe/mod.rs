//! Sample selection for the CRSP stock file.
//!
//! The standard research sample keeps ordinary common shares (share codes 10
//! and 11) listed on NYSE, AMEX or NASDAQ.

pub mod exchange;

pub use exchange::Exchange;

use crate::columns::stocks;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordinary common shares, not further defined.
pub const SHARE_CODE_ORDINARY: i64 = 10;

/// Ordinary common shares that need not be further defined.
pub const SHARE_CODE_ORDINARY_NFD: i64 = 11;

/// Trait for security universes.
pub trait Universe {
    /// Whether a row with these codes belongs to the universe.
    fn admits(&self, share_code: Option<i64>, exchange_code: Option<i64>) -> bool;

    /// Polars predicate selecting the same rows as [`Universe::admits`].
    fn predicate(&self) -> Expr;
}

/// Share-code and exchange filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseFilter {
    /// Admitted `SHRCD` values
    pub share_codes: Vec<i64>,
    /// Admitted listing exchanges
    pub exchanges: Vec<Exchange>,
}

impl Default for UniverseFilter {
    fn default() -> Self {
        Self {
            share_codes: vec![SHARE_CODE_ORDINARY, SHARE_CODE_ORDINARY_NFD],
            exchanges: Exchange::all(),
        }
    }
}

impl UniverseFilter {
    /// Restrict the filter to a single exchange.
    pub fn only(exchange: Exchange) -> Self {
        Self {
            exchanges: vec![exchange],
            ..Self::default()
        }
    }
}

/// OR together equality tests of `column` against each value.
fn any_of(column: &str, values: impl IntoIterator<Item = i64>) -> Expr {
    values
        .into_iter()
        .map(|v| col(column).eq(lit(v)))
        .reduce(|acc, e| acc.or(e))
        .unwrap_or_else(|| lit(false))
}

impl Universe for UniverseFilter {
    fn admits(&self, share_code: Option<i64>, exchange_code: Option<i64>) -> bool {
        let share_ok = share_code.is_some_and(|c| self.share_codes.contains(&c));
        let exchange_ok = exchange_code
            .and_then(Exchange::from_code)
            .is_some_and(|e| self.exchanges.contains(&e));
        share_ok && exchange_ok
    }

    fn predicate(&self) -> Expr {
        let shares = any_of(stocks::SHRCD, self.share_codes.iter().copied());
        let exchanges = any_of(stocks::EXCHCD, self.exchanges.iter().map(Exchange::code));
        // Null codes compare as null; fill so the filter drops them.
        shares.and(exchanges).fill_null(lit(false))
    }
}
