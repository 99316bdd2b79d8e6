//! CRSP exchange codes (`EXCHCD`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary listing exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// New York Stock Exchange
    Nyse,

    /// American Stock Exchange
    Amex,

    /// NASDAQ Stock Market
    Nasdaq,
}

impl Exchange {
    /// Returns all exchanges in code order.
    pub fn all() -> Vec<Self> {
        vec![Self::Nyse, Self::Amex, Self::Nasdaq]
    }

    /// Returns the CRSP `EXCHCD` value.
    pub const fn code(&self) -> i64 {
        match self {
            Self::Nyse => 1,
            Self::Amex => 2,
            Self::Nasdaq => 3,
        }
    }

    /// Returns the short exchange name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Nyse => "NYSE",
            Self::Amex => "AMEX",
            Self::Nasdaq => "NASDAQ",
        }
    }

    /// Parse an exchange from its CRSP code.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Nyse),
            2 => Some(Self::Amex),
            3 => Some(Self::Nasdaq),
            _ => None,
        }
    }

    /// Parse an exchange from its name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nyse" | "n" => Some(Self::Nyse),
            "amex" | "a" => Some(Self::Amex),
            "nasdaq" | "q" => Some(Self::Nasdaq),
            _ => None,
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
