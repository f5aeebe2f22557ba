//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing a draft with the canonical
//! vocabulary.

use crate::config::{AppConfig, DiffPaths};
use crate::diff::DiffResult;
use crate::pipeline::{
    compute_diff, exit_codes, load_previous_changes, output_report, parse_graph_with_context,
};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(config: &AppConfig, paths: &DiffPaths) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let canonical = parse_graph_with_context(&paths.canonical, quiet)?;
    let draft = parse_graph_with_context(&paths.draft, quiet)?;
    let previous = paths
        .previous
        .as_deref()
        .map(|path| load_previous_changes(path, quiet))
        .transpose()?;

    let result = compute_diff(config, &canonical, &draft, previous.as_deref())?;
    output_report(config, paths, &result)?;

    Ok(determine_exit_code(config, &result))
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &AppConfig, result: &DiffResult) -> i32 {
    if config.behavior.fail_on_change && result.summary.total_changes > 0 {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Change, ChangeType, Iri, ObjectValue};

    fn result_with_change() -> DiffResult {
        let change = Change::named(
            Iri::new("urn:change:1"),
            ChangeType::Removed,
            Iri::new("https://example.org/a"),
            Iri::new("https://example.org/p"),
            ObjectValue::BlankNode,
        );
        DiffResult::from_changes(vec![change], Vec::new())
    }

    #[test]
    fn test_exit_code_respects_fail_on_change() {
        let lenient = AppConfig::default();
        assert_eq!(
            determine_exit_code(&lenient, &result_with_change()),
            exit_codes::SUCCESS
        );

        let failing = AppConfig::builder().fail_on_change(true).build();
        assert_eq!(
            determine_exit_code(&failing, &result_with_change()),
            exit_codes::CHANGES_DETECTED
        );
        assert_eq!(
            determine_exit_code(&failing, &DiffResult::new()),
            exit_codes::SUCCESS
        );
    }
}
