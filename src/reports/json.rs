//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ComposedChange, DiffResult, DiffSummary};
use crate::model::{Change, ReviewState};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let reviewer = config.reviewer.as_deref();
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: &config.metadata.tool_version,
                },
                title: config.title.as_deref(),
                canonical: config.metadata.canonical_path.as_deref(),
                draft: config.metadata.draft_path.as_deref(),
                reviewer,
            },
            summary: &result.summary,
            changes: if self.summary_only || !config.include_constituents {
                None
            } else {
                Some(&result.changes)
            },
            composed: if self.summary_only {
                None
            } else {
                Some(
                    result
                        .composed
                        .iter()
                        .map(|entry| JsonComposedEntry {
                            review: entry.review_state(reviewer),
                            entry,
                        })
                        .collect(),
                )
            },
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    summary: &'a DiffSummary,
    /// Flat change list; readable back as the previous change list of a
    /// later run
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<&'a Vec<Change>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    composed: Option<Vec<JsonComposedEntry<'a>>>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reviewer: Option<&'a str>,
}

#[derive(Serialize)]
struct ToolInfo<'a> {
    name: &'a str,
    version: &'a str,
}

/// A composed entry together with its review state for the report's
/// reviewer.
#[derive(Serialize)]
struct JsonComposedEntry<'a> {
    review: ReviewState,
    #[serde(flatten)]
    entry: &'a ComposedChange,
}
