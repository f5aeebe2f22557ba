//! Pipeline orchestration for vocabulary diff runs.
//!
//! This module provides the shared parse → diff → report workflow used by
//! the CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{load_previous_changes, parse_graph_with_context};
pub use report_stage::output_report;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an input file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or changes without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and --fail-on-change was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::ParseFailed {
            path: "draft.ttl".to_string(),
            source: anyhow::anyhow!("unexpected token"),
        };
        assert_eq!(err.to_string(), "Parse failed for draft.ttl: unexpected token");
    }
}
