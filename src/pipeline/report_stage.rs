//! Report output stage.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget, PipelineError};
use crate::config::{AppConfig, DiffPaths};
use crate::diff::DiffResult;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;

/// Render a diff report and write it to the configured destination.
pub fn output_report(config: &AppConfig, paths: &DiffPaths, result: &DiffResult) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    let report_config = ReportConfig {
        reviewer: config.diff.reviewer.clone(),
        metadata: ReportMetadata {
            canonical_path: Some(paths.canonical.display().to_string()),
            draft_path: Some(paths.draft.display().to_string()),
            ..ReportMetadata::new()
        },
        ..ReportConfig::default()
    };

    // Escape codes only make sense on a terminal.
    let use_color =
        should_use_color(config.output.no_color) && matches!(output_target, OutputTarget::Stdout);
    let reporter = create_reporter_with_options(effective_output, use_color);

    tracing::debug!(format = %effective_output, "rendering report");
    let report = reporter
        .generate_diff_report(result, &report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&report, &output_target, config.behavior.quiet)
}
