//! Pipeline errors.

use thiserror::Error;

/// Errors raised by the end-to-end pipelines.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading or parsing an input file failed.
    #[error("Data error: {0}")]
    Data(#[from] crsp_data::DataError),

    /// A portfolio construction failed.
    #[error("Portfolio error: {0}")]
    Portfolio(#[from] crsp_portfolios::PortfolioError),

    /// A summary table could not be built.
    #[error("Summary error: {0}")]
    Summary(#[from] crsp_output::SummaryError),

    /// Writing an output file failed.
    #[error("Export error: {0}")]
    Export(#[from] crsp_output::ExportError),

    /// Writing the run report failed.
    #[error("Report error: {0}")]
    Report(#[from] crsp_output::ReportError),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
