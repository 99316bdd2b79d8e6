//! Output column names of each construction.

pub use crsp_data::columns::{MONTH, YEAR};

/// Intermediate stock panel columns.
pub mod panel {
    /// Return including delisting return
    pub const RET_FULL: &str = "ret_full";
    /// Market capitalisation `|prc| × shrout`
    pub const MC: &str = "mc";
    /// Previous row's market capitalisation for the same security
    pub const LAG_MC: &str = "lag_mc";
}

/// Stock market returns.
pub mod market {
    /// Total lagged market value of the month's constituents
    pub const STOCK_LAG_MV: &str = "stock_lag_mv";
    /// Equal-weighted return
    pub const STOCK_EW_RET: &str = "stock_ew_ret";
    /// Value-weighted return
    pub const STOCK_VW_RET: &str = "stock_vw_ret";
}

/// Bond market returns.
pub mod bonds {
    /// Lagged bond market value, scaled
    pub const BOND_LAG_MV: &str = "bond_lag_mv";
    /// Equal-weighted return
    pub const BOND_EW_RET: &str = "bond_ew_ret";
    /// Value-weighted return
    pub const BOND_VW_RET: &str = "bond_vw_ret";
    /// Previous month's amount outstanding for the same issue
    pub const LAG_ME: &str = "lag_me";
}

/// Excess returns over the 30-day T-bill.
pub mod excess {
    /// Stock excess value-weighted return
    pub const STOCK_EXCESS_VW_RET: &str = "stock_excess_vw_ret";
    /// Bond excess value-weighted return
    pub const BOND_EXCESS_VW_RET: &str = "bond_excess_vw_ret";
}

/// Risk-parity output.
pub mod risk_parity {
    pub use super::excess::{BOND_EXCESS_VW_RET, STOCK_EXCESS_VW_RET};

    /// Market-value weighted stock/bond excess return
    pub const EXCESS_VW_RET: &str = "excess_vw_ret";
    /// 60/40 stock/bond excess return
    pub const EXCESS_60_40_RET: &str = "excess_60_40_ret";
    /// Inverse of the stock rolling volatility
    pub const STOCK_INVERSE_SIGMA_HAT: &str = "stock_inverse_sigma_hat";
    /// Inverse of the bond rolling volatility
    pub const BOND_INVERSE_SIGMA_HAT: &str = "bond_inverse_sigma_hat";
    /// Normaliser making unlevered weights sum to one
    pub const UNLEVERED_K: &str = "unlevered_k";
    /// Unlevered risk-parity excess return
    pub const EXCESS_UNLEVERED_RP_RET: &str = "excess_unlevered_rp_ret";
    /// Leverage matching the value-weighted portfolio's volatility
    pub const LEVERED_K: &str = "levered_k";
    /// Levered risk-parity excess return
    pub const EXCESS_LEVERED_RP_RET: &str = "excess_levered_rp_ret";
}

/// Momentum panel and decile returns.
pub mod momentum {
    /// Lagged market capitalisation, scaled
    pub const LAG_MKT_CAP: &str = "lag_mkt_cap";
    /// Holding-month return
    pub const RET: &str = "ret";
    /// Cumulative return over the ranking window
    pub const RANKING_RET: &str = "ranking_ret";
    /// Decile under universe-wide breakpoints
    pub const DM_DECILE: &str = "dm_decile";
    /// Decile under reference-exchange breakpoints
    pub const KRF_DECILE: &str = "krf_decile";
    /// Decile label in the returns frame
    pub const DECILE: &str = "decile";
    /// Decile return under universe-wide breakpoints
    pub const DM_RET: &str = "dm_ret";
    /// Decile return under reference-exchange breakpoints
    pub const KRF_RET: &str = "krf_ret";
    /// Risk-free rate
    pub const RF: &str = "rf";
}
