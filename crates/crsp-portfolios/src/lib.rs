#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/crsp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bonds;
pub mod columns;
pub mod construction;
pub mod error;
pub mod excess;
mod frame;
pub mod market;
pub mod momentum;
pub mod panel;
pub mod registry;
pub mod risk_parity;
pub mod weighting;

pub use bonds::{BondConfig, BondPortfolio, bond_returns};
pub use construction::{Construction, validate_columns};
pub use error::{PortfolioError, Result};
pub use excess::excess_universe;
pub use market::{MarketConfig, MarketPortfolio, market_returns};
pub use momentum::{
    DecileAssignment, DecileConfig, DecileReturnConfig, MomentumDeciles, MomentumRanking,
    MonthObservation, OutOfRange, RankingConfig, assign_bucket, assign_deciles, assign_month,
    decile_returns, quantile_breakpoints, ranking_panel,
};
pub use registry::{
    PortfolioCategory, PortfolioInfo, available_portfolios, get_portfolio_info,
    portfolios_by_category,
};
pub use risk_parity::{RiskParityConfig, RiskParityPortfolio, risk_parity};
pub use weighting::Weighting;
