//! Loaders for CRSP files exported from WRDS.

pub mod bonds;
pub mod riskless;
pub mod stocks;

pub use bonds::{load_bonds, read_bonds};
pub use riskless::{load_riskless, read_riskless};
pub use stocks::{load_stocks, read_stocks};
