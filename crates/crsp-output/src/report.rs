//! Run reports: what was run, with which configuration, and its results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Builder was not given a command.
    #[error("Report has no command")]
    MissingCommand,
}

/// Record of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Subcommand that produced the report.
    pub command: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Effective configuration.
    pub config: serde_json::Value,

    /// Tables, comparisons and output file names.
    pub contents: serde_json::Value,
}

impl RunReport {
    /// Create a new report stamped with the current time.
    pub fn new(command: String, config: serde_json::Value, contents: serde_json::Value) -> Self {
        Self {
            command,
            timestamp: Utc::now(),
            config,
            contents,
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct RunReportBuilder {
    command: Option<String>,
    config: Option<serde_json::Value>,
    contents: serde_json::Map<String, serde_json::Value>,
}

impl RunReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Record the configuration.
    pub fn config<T: Serialize>(mut self, config: &T) -> Result<Self, ReportError> {
        self.config = Some(serde_json::to_value(config)?);
        Ok(self)
    }

    /// Add a named section to the contents.
    pub fn section<T: Serialize>(mut self, name: &str, value: &T) -> Result<Self, ReportError> {
        self.contents
            .insert(name.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Build the report.
    pub fn build(self) -> Result<RunReport, ReportError> {
        let command = self.command.ok_or(ReportError::MissingCommand)?;
        Ok(RunReport::new(
            command,
            self.config.unwrap_or(serde_json::Value::Null),
            serde_json::Value::Object(self.contents),
        ))
    }
}
