//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: summary on a terminal, JSON otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Brief summary output
    Summary,
    /// Compact table for terminal (colored)
    Table,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Maximum rows per section in text reports
    pub max_items: Option<usize>,
    /// Include atomic changes that were folded into composites
    pub include_constituents: bool,
    /// Reviewer whose verdicts are shown
    pub reviewer: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            max_items: None,
            include_constituents: true,
            reviewer: None,
            metadata: ReportMetadata::new(),
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Canonical graph file path
    pub canonical_path: Option<String>,
    /// Draft graph file path
    pub draft_path: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
