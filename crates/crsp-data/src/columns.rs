//! Canonical column names of the frames produced by the loaders.
//!
//! Raw files use WRDS capitalisation (`PERMNO`, `MCALDT`, ...); loaders
//! rename everything to the lowercase names below so downstream code never
//! deals with source-specific spellings.

/// Month key columns shared by every frame.
pub const YEAR: &str = "year";
/// Month of year, 1-12.
pub const MONTH: &str = "month";

/// CRSP monthly stock file.
pub mod stocks {
    /// Permanent security identifier
    pub const PERMNO: &str = "permno";
    /// Share code
    pub const SHRCD: &str = "shrcd";
    /// Exchange code
    pub const EXCHCD: &str = "exchcd";
    /// Holding period return
    pub const RET: &str = "ret";
    /// Delisting return
    pub const DLRET: &str = "dlret";
    /// Price (negative when it is a bid/ask midpoint)
    pub const PRC: &str = "prc";
    /// Shares outstanding, thousands
    pub const SHROUT: &str = "shrout";

    /// Raw header names, in the order they are mapped above.
    pub const RAW: [&str; 8] = [
        "PERMNO", "date", "SHRCD", "EXCHCD", "RET", "DLRET", "PRC", "SHROUT",
    ];
}

/// CRSP monthly treasury (bond) file.
pub mod bonds {
    /// Issue identifier
    pub const KYCRSPID: &str = "kycrspid";
    /// Unadjusted monthly return
    pub const RET: &str = "ret";
    /// Total amount outstanding
    pub const ME: &str = "me";

    /// Raw header names.
    pub const RAW: [&str; 4] = ["KYCRSPID", "MCALDT", "TMRETNUA", "TMTOTOUT"];
}

/// CRSP riskless rate file.
pub mod riskless {
    /// 30-day T-bill return
    pub const T30RET: &str = "t30ret";
    /// 90-day T-bill return
    pub const T90RET: &str = "t90ret";

    /// Raw header names.
    pub const RAW: [&str; 3] = ["caldt", "t30ret", "t90ret"];
}

/// Fama-French research factors.
pub mod french {
    /// Market excess return
    pub const MKT_RF: &str = "mkt_rf";
    /// Small-minus-big
    pub const SMB: &str = "smb";
    /// High-minus-low
    pub const HML: &str = "hml";
    /// One-month T-bill rate
    pub const RF: &str = "rf";
}

/// Benchmark decile return files.
pub mod benchmark {
    /// Decile label, 1-10
    pub const DECILE: &str = "decile";
    /// Decile portfolio return
    pub const RET: &str = "ret";
}
