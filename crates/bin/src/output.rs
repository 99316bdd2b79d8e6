//! Files written under `--output`.

use crsp::PipelineConfig;
use crsp_output::{ExportError, ExportFormat, Exporter, ReportError, RunReportBuilder};
use log::info;
use std::path::PathBuf;

/// Destination for exported frames and tables. Without a directory every
/// write is a no-op.
#[derive(Debug)]
pub(crate) struct OutputDir {
    dir: Option<PathBuf>,
    format: ExportFormat,
    written: Vec<String>,
}

impl OutputDir {
    pub(crate) fn new(dir: Option<PathBuf>, format: ExportFormat) -> std::io::Result<Self> {
        if let Some(dir) = &dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            dir,
            format,
            written: Vec::new(),
        })
    }

    /// Export `item` as `<name>.<ext>`.
    pub(crate) fn write(&mut self, name: &str, item: &impl Exporter) -> Result<(), ExportError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let file = format!("{name}.{}", self.format.extension());
        let path = dir.join(&file);
        item.export_to_file(&path, self.format)?;
        info!("wrote {}", path.display());
        self.written.push(file);
        Ok(())
    }

    /// Write `report.json` listing the configuration and the files written.
    pub(crate) fn finish(self, command: &str, config: &PipelineConfig) -> Result<(), ReportError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let report = RunReportBuilder::new()
            .command(command)
            .config(config)?
            .section("format", &self.format)?
            .section("files", &self.written)?
            .build()?;
        let path = dir.join("report.json");
        report.write_to(&path)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crsp_output::{FrameExport, RunReport};
    use polars::prelude::*;

    #[test]
    fn test_without_directory_writes_nothing() {
        let df = df! { "year" => [1926i32] }.unwrap();
        let mut out = OutputDir::new(None, ExportFormat::Csv).unwrap();
        out.write("frame", &FrameExport::new(&df)).unwrap();
        assert!(out.written.is_empty());
        out.finish("market", &PipelineConfig::default()).unwrap();
    }

    #[test]
    fn test_writes_files_and_report() {
        let dir = std::env::temp_dir().join("crsp_bin_output_test");
        let df = df! { "year" => [1926i32], "month" => [7i32] }.unwrap();
        let mut out = OutputDir::new(Some(dir.clone()), ExportFormat::Json).unwrap();
        out.write("frame", &FrameExport::new(&df)).unwrap();
        out.finish("bonds", &PipelineConfig::default()).unwrap();

        assert!(dir.join("frame.json").exists());
        let report: RunReport =
            serde_json::from_str(&std::fs::read_to_string(dir.join("report.json")).unwrap())
                .unwrap();
        assert_eq!(report.command, "bonds");
        assert_eq!(report.contents["files"][0], "frame.json");
        std::fs::remove_dir_all(&dir).ok();
    }
}
