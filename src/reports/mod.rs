//! Report generation for diff results.
//!
//! This module provides the output formats for vocabulary diff results:
//! - JSON: Structured data for programmatic integration and for feeding a
//!   change list back into a later run
//! - Summary: Compact shell-friendly output
//! - Table: Aligned tabular terminal output

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::DiffResult;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for crate::error::VocabDiffError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::IoError(e) => e.into(),
            ReportError::SerializationError(msg) => Self::report(
                "rendering report",
                crate::error::ReportErrorKind::JsonSerializationError(msg),
            ),
            ReportError::FormatError(e) => Self::report(
                "rendering report",
                crate::error::ReportErrorKind::UnsupportedFormat(e.to_string()),
            ),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from diff results
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_formats() {
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
        assert_eq!(
            create_reporter(ReportFormat::Auto).format(),
            ReportFormat::Summary
        );
        assert_eq!(
            create_reporter_with_options(ReportFormat::Table, false).format(),
            ReportFormat::Table
        );
    }

    #[test]
    fn test_write_diff_report_to_buffer() {
        let result = DiffResult::new();
        let mut buffer = Vec::new();
        JsonReporter::new()
            .write_diff_report(&result, &ReportConfig::default(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"total_changes\": 0"));
    }

    #[test]
    fn test_report_format_serde_names() {
        let yaml = serde_yaml::to_string(&ReportFormat::Table).unwrap();
        assert_eq!(yaml.trim(), "table");
        let parsed: ReportFormat = serde_yaml::from_str("json").unwrap();
        assert_eq!(parsed, ReportFormat::Json);
    }
}
