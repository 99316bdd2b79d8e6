//! Logger bootstrap.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Level for a `-v` count: warn, info, debug, then trace.
pub(crate) const fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start logging to stderr. `RUST_LOG`, when set, replaces the level.
///
/// The returned handle must be kept alive for the duration of the run.
pub(crate) fn init(verbosity: u8) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level(verbosity))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
}
