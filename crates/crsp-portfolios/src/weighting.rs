//! Portfolio weighting schemes.
//!
//! Value weights are prior-period market capitalisations. A row only counts
//! towards a value-weighted mean when its weight is non-null and
//! non-negative, and a group whose admissible weights sum to zero has no
//! value-weighted return.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How constituents are weighted inside a portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Weight by lagged market capitalisation
    #[default]
    Value,
    /// Weight every constituent equally
    Equal,
}

impl Weighting {
    /// Aggregation expression for use inside `group_by(..).agg(..)`.
    pub fn aggregate(&self, ret: &str, weight: &str) -> Expr {
        match self {
            Self::Value => value_weighted(ret, weight),
            Self::Equal => col(ret).mean(),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Equal => write!(f, "equal"),
        }
    }
}

impl FromStr for Weighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "value" | "vw" => Ok(Self::Value),
            "equal" | "ew" => Ok(Self::Equal),
            other => Err(format!("unknown weighting '{other}'")),
        }
    }
}

/// Rows whose weight may enter a value-weighted mean.
pub fn valid_weight(weight: &str) -> Expr {
    col(weight).is_not_null().and(col(weight).gt_eq(lit(0.0)))
}

/// `Σ w·r / Σ w` over admissible weights, null when `Σ w` is zero.
pub fn value_weighted(ret: &str, weight: &str) -> Expr {
    let valid = valid_weight(weight);
    let numerator = (col(ret) * col(weight)).filter(valid.clone()).sum();
    let denominator = col(weight).filter(valid).sum();
    when(denominator.clone().gt(lit(0.0)))
        .then(numerator / denominator)
        .otherwise(lit(NULL))
}

/// Sum of admissible weights.
pub fn weight_total(weight: &str) -> Expr {
    col(weight).filter(valid_weight(weight)).sum()
}
