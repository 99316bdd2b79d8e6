//! Momentum decile portfolios
//!
//! Three steps, each a function over frames:
//! - [`ranking_panel`]: security-months with their t-12..t-2 ranking return
//! - [`assign_deciles`]: DM and KRF decile labels per month
//! - [`decile_returns`]: value- or equal-weighted decile returns with `rf`

pub mod deciles;
pub mod ranking;
pub mod returns;

pub use deciles::{
    DecileAssignment, DecileConfig, MomentumDeciles, MonthObservation, OutOfRange, assign_bucket,
    assign_deciles, assign_month, quantile_breakpoints,
};
pub use ranking::{MomentumRanking, RankingConfig, ranking_panel};
pub use returns::{DecileReturnConfig, decile_returns};
