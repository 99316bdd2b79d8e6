#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/crsp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod descriptive;
pub mod error;
pub mod performance;
pub mod rolling;

pub use descriptive::{correlation, excess_kurtosis, mean, skewness, std_dev, t_stat};
pub use error::{Result, StatsError};
pub use performance::{
    PERIODS_PER_YEAR, annualized_mean, annualized_sharpe, annualized_volatility,
};
pub use rolling::{lag, rolling_product_return, rolling_std};
