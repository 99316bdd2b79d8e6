//! Portfolio Registry
//!
//! Catalogue of the available constructions and the input columns each one
//! reads.

use crate::columns::bonds::{BOND_LAG_MV, BOND_VW_RET};
use crate::columns::excess::{BOND_EXCESS_VW_RET, STOCK_EXCESS_VW_RET};
use crate::columns::market::{STOCK_LAG_MV, STOCK_VW_RET};
use crate::columns::momentum::{DM_DECILE, KRF_DECILE, LAG_MKT_CAP, RANKING_RET, RET};
use crate::columns::{MONTH, YEAR};
use crate::panel::STOCK_COLUMNS;
use crsp_data::columns::bonds::{KYCRSPID, ME};
use crsp_data::columns::riskless::T30RET;
use crsp_data::columns::stocks::EXCHCD;
use std::fmt;

/// Portfolio categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortfolioCategory {
    /// Aggregate stock market
    Stocks,
    /// Aggregate Treasury market
    Bonds,
    /// Stock/bond allocations
    Allocation,
    /// Momentum deciles
    Momentum,
}

impl PortfolioCategory {
    /// All categories in display order.
    pub const fn all() -> [Self; 4] {
        [Self::Stocks, Self::Bonds, Self::Allocation, Self::Momentum]
    }
}

impl fmt::Display for PortfolioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stocks => "stocks",
            Self::Bonds => "bonds",
            Self::Allocation => "allocation",
            Self::Momentum => "momentum",
        };
        write!(f, "{name}")
    }
}

/// Portfolio metadata
#[derive(Debug, Clone)]
pub struct PortfolioInfo {
    /// Construction name (unique identifier)
    pub name: &'static str,
    /// Portfolio category
    pub category: PortfolioCategory,
    /// Brief description of the series
    pub description: &'static str,
    /// Required column names in the input frame(s)
    pub required_columns: &'static [&'static str],
}

/// Get all available portfolio info
pub fn available_portfolios() -> Vec<PortfolioInfo> {
    vec![
        PortfolioInfo {
            name: "stock_market",
            category: PortfolioCategory::Stocks,
            description: "Value- and equal-weighted returns of common stocks on NYSE, AMEX and NASDAQ",
            required_columns: STOCK_COLUMNS,
        },
        PortfolioInfo {
            name: "bond_market",
            category: PortfolioCategory::Bonds,
            description: "Value- and equal-weighted Treasury returns",
            required_columns: &[KYCRSPID, YEAR, MONTH, RET, ME],
        },
        PortfolioInfo {
            name: "excess_universe",
            category: PortfolioCategory::Allocation,
            description: "Stock and bond value-weighted returns in excess of the 30-day T-bill",
            required_columns: &[
                YEAR,
                MONTH,
                STOCK_LAG_MV,
                STOCK_VW_RET,
                BOND_LAG_MV,
                BOND_VW_RET,
                T30RET,
            ],
        },
        PortfolioInfo {
            name: "risk_parity",
            category: PortfolioCategory::Allocation,
            description: "Value-weighted, 60/40, unlevered and levered risk-parity stock/bond portfolios",
            required_columns: &[
                YEAR,
                MONTH,
                STOCK_LAG_MV,
                STOCK_EXCESS_VW_RET,
                BOND_LAG_MV,
                BOND_EXCESS_VW_RET,
            ],
        },
        PortfolioInfo {
            name: "momentum_ranking",
            category: PortfolioCategory::Momentum,
            description: "Cumulative return from t-12 to t-2 per security-month",
            required_columns: STOCK_COLUMNS,
        },
        PortfolioInfo {
            name: "momentum_deciles",
            category: PortfolioCategory::Momentum,
            description: "Decile labels from universe (DM) and NYSE (KRF) breakpoints",
            required_columns: &[YEAR, MONTH, EXCHCD, RANKING_RET],
        },
        PortfolioInfo {
            name: "momentum_returns",
            category: PortfolioCategory::Momentum,
            description: "Value- or equal-weighted returns of the momentum deciles",
            required_columns: &[YEAR, MONTH, RET, LAG_MKT_CAP, DM_DECILE, KRF_DECILE],
        },
    ]
}

/// Get portfolios by category
pub fn portfolios_by_category(category: PortfolioCategory) -> Vec<PortfolioInfo> {
    available_portfolios()
        .into_iter()
        .filter(|p| p.category == category)
        .collect()
}

/// Get portfolio info by name
pub fn get_portfolio_info(name: &str) -> Option<PortfolioInfo> {
    available_portfolios().into_iter().find(|p| p.name == name)
}
