//! Pipeline configuration.
//!
//! Every section defaults to the standard sample definitions, so a JSON file
//! only needs the fields it changes:
//!
//! ```
//! use crsp::PipelineConfig;
//!
//! let config = PipelineConfig::from_json(r#"{"risk_parity": {"lag_volatility": true}}"#).unwrap();
//! assert!(config.risk_parity.lag_volatility);
//! assert_eq!(config.risk_parity.vol_window, 36);
//! ```

use crate::error::Result;
use crsp_data::YearMonth;
use crsp_output::SampleWindow;
use crsp_portfolios::{
    BondConfig, DecileConfig, DecileReturnConfig, MarketConfig, RankingConfig, RiskParityConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sample windows of the summary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Market table and replication check (default: from 1926-07)
    pub market: SampleWindow,
    /// Risk-parity table (default: 1929-01 to 2010-06)
    pub risk_parity: SampleWindow,
    /// Momentum tables (default: 1927 to 2016)
    pub momentum: SampleWindow,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            market: SampleWindow::starting(YearMonth {
                year: 1926,
                month: 7,
            }),
            risk_parity: SampleWindow::between(
                YearMonth {
                    year: 1929,
                    month: 1,
                },
                YearMonth {
                    year: 2010,
                    month: 6,
                },
            ),
            momentum: SampleWindow::years(1927, 2016),
        }
    }
}

/// Configuration of all three pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stock market portfolio
    pub market: MarketConfig,
    /// Bond market portfolio
    pub bonds: BondConfig,
    /// Risk-parity portfolios
    pub risk_parity: RiskParityConfig,
    /// Momentum ranking panel
    pub ranking: RankingConfig,
    /// Decile assignment
    pub deciles: DecileConfig,
    /// Decile portfolio returns
    pub decile_returns: DecileReturnConfig,
    /// Summary table samples
    pub samples: SampleConfig,
}

impl PipelineConfig {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Serialise as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
