//! CSV and JSON export of portfolio frames and summary tables.

use crate::comparison::ReplicationComparison;
use crate::summary::{PerformanceStats, PerformanceTable};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame access error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

fn to_json<T: Serialize + ?Sized>(value: &T, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(value)?),
        _ => Ok(serde_json::to_string(value)?),
    }
}

/// A polars frame exported as CSV or as an array of JSON records.
///
/// Nulls are written as empty CSV fields and JSON `null`; non-finite floats
/// become `null` in JSON.
#[derive(Debug, Clone, Copy)]
pub struct FrameExport<'a> {
    frame: &'a DataFrame,
}

impl<'a> FrameExport<'a> {
    /// Wrap a frame for export.
    pub const fn new(frame: &'a DataFrame) -> Self {
        Self { frame }
    }

    fn csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        let names = self.frame.get_column_names();
        wtr.write_record(names.iter().map(|n| n.as_str()))?;

        let mut cells = Vec::with_capacity(names.len());
        for column in self.frame.get_columns() {
            let text = column.as_materialized_series().cast(&DataType::String)?;
            let values: Vec<String> = text
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect();
            cells.push(values);
        }
        for row in 0..self.frame.height() {
            wtr.write_record(cells.iter().map(|c| c[row].as_str()))?;
        }
        finish(wtr)
    }

    fn json_values(column: &Column) -> Result<Vec<Value>, ExportError> {
        let series = column.as_materialized_series();
        let dtype = series.dtype();
        let values = if dtype.is_integer() {
            series
                .cast(&DataType::Int64)?
                .i64()?
                .into_iter()
                .map(|v| v.map_or(Value::Null, Value::from))
                .collect()
        } else if dtype.is_float() {
            series
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.and_then(Number::from_f64).map_or(Value::Null, Value::Number))
                .collect()
        } else if dtype.is_bool() {
            series
                .bool()?
                .into_iter()
                .map(|v| v.map_or(Value::Null, Value::Bool))
                .collect()
        } else {
            series
                .cast(&DataType::String)?
                .str()?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |s| Value::String(s.to_string())))
                .collect()
        };
        Ok(values)
    }

    fn records(&self) -> Result<Vec<Value>, ExportError> {
        let columns = self
            .frame
            .get_columns()
            .iter()
            .map(|c| Ok((c.name().to_string(), Self::json_values(c)?)))
            .collect::<Result<Vec<_>, ExportError>>()?;

        Ok((0..self.frame.height())
            .map(|row| {
                let record: Map<String, Value> = columns
                    .iter()
                    .map(|(name, values)| (name.clone(), values[row].clone()))
                    .collect();
                Value::Object(record)
            })
            .collect())
    }
}

impl Exporter for FrameExport<'_> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => self.csv(),
            _ => to_json(&self.records()?, format),
        }
    }
}

/// Flat CSV record of a table row.
#[derive(Debug, Serialize)]
struct PerformanceRecord<'a> {
    table: &'a str,
    series: &'a str,
    annualized_mean: f64,
    t_stat: f64,
    annualized_volatility: f64,
    sharpe: f64,
    skewness: f64,
    excess_kurtosis: f64,
    correlation: Option<f64>,
    observations: usize,
}

impl<'a> PerformanceRecord<'a> {
    fn new(table: &'a str, row: &'a PerformanceStats) -> Self {
        Self {
            table,
            series: &row.name,
            annualized_mean: row.annualized_mean,
            t_stat: row.t_stat,
            annualized_volatility: row.annualized_volatility,
            sharpe: row.sharpe,
            skewness: row.skewness,
            excess_kurtosis: row.excess_kurtosis,
            correlation: row.correlation,
            observations: row.observations,
        }
    }
}

impl Exporter for PerformanceTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for row in &self.rows {
                    wtr.serialize(PerformanceRecord::new(&self.title, row))?;
                }
                finish(wtr)
            }
            _ => to_json(self, format),
        }
    }
}

impl Exporter for Vec<PerformanceTable> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for table in self {
                    for row in &table.rows {
                        wtr.serialize(PerformanceRecord::new(&table.title, row))?;
                    }
                }
                finish(wtr)
            }
            _ => to_json(self, format),
        }
    }
}

impl Exporter for ReplicationComparison {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.serialize(self)?;
                finish(wtr)
            }
            _ => to_json(self, format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crsp_data::YearMonth;
    use rstest::rstest;

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("JSON", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    fn test_format_parsing(#[case] raw: &str, #[case] expected: ExportFormat) {
        assert_eq!(raw.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::InvalidFormat(_))
        ));
    }

    fn frame() -> DataFrame {
        df! {
            "year" => [1926i32, 1926],
            "month" => [7i32, 8],
            "stock_vw_ret" => [Some(0.03), None],
            "label" => ["a", "b"],
        }
        .unwrap()
    }

    #[test]
    fn test_frame_csv() {
        let df = frame();
        let csv = FrameExport::new(&df)
            .export_to_string(ExportFormat::Csv)
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "year,month,stock_vw_ret,label");
        assert_eq!(lines[1], "1926,7,0.03,a");
        assert_eq!(lines[2], "1926,8,,b");
    }

    #[test]
    fn test_frame_json() {
        let df = frame();
        let json = FrameExport::new(&df)
            .export_to_string(ExportFormat::Json)
            .unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["year"], 1926);
        assert_eq!(records[0]["stock_vw_ret"], 0.03);
        assert!(records[1]["stock_vw_ret"].is_null());
        assert_eq!(records[1]["label"], "b");
    }

    fn table() -> PerformanceTable {
        let ym = |m| YearMonth::new(1926, m).unwrap();
        PerformanceTable {
            title: "Market".to_string(),
            period_start: ym(7),
            period_end: ym(10),
            benchmark: None,
            rows: vec![
                PerformanceStats::from_returns("A", &[0.01, 0.02, -0.01, 0.03]),
                PerformanceStats::from_returns("B", &[0.02, 0.01, 0.0, 0.01]),
            ],
        }
    }

    #[test]
    fn test_table_export() {
        let t = table();
        let csv = t.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("table,series,annualized_mean"));

        let json = t.export_to_string(ExportFormat::PrettyJson).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["rows"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["period_start"]["month"], 7);

        let many = vec![t.clone(), t];
        let csv = many.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 5);
    }

    #[test]
    fn test_comparison_export_to_file() {
        let c = ReplicationComparison::between("x", "y", &[0.1, 0.2, 0.4], &[0.1, 0.25, 0.35])
            .unwrap();
        let path = std::env::temp_dir().join("crsp_output_comparison_test.json");
        c.export_to_file(&path, ExportFormat::Json).unwrap();
        let back: ReplicationComparison =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, c);
        std::fs::remove_file(&path).ok();

        let csv = c.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("replicated,benchmark,correlation"));
    }
}
