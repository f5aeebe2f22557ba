//! Diff computation stage.
//!
//! Builds the engine from configuration, runs it, and reconciles with a
//! previous change list when one is given.

use super::PipelineError;
use crate::config::AppConfig;
use crate::diff::{DiffEngine, DiffResult};
use crate::model::{Change, Graph, UuidIdentifierGenerator};
use anyhow::Result;

/// Run the change computation between the canonical graph and the draft.
pub fn compute_diff(
    config: &AppConfig,
    canonical: &Graph,
    draft: &Graph,
    previous: Option<&[Change]>,
) -> Result<DiffResult> {
    let quiet = config.behavior.quiet;

    if !quiet {
        tracing::info!("Computing vocabulary diff...");
    }

    let engine = DiffEngine::new()
        .with_config(config.diff.to_engine_config())
        .with_identifiers(Box::new(UuidIdentifierGenerator::new(
            config.diff.change_namespace.clone(),
        )));

    let result = match previous {
        Some(previous) => {
            let (result, stats) = engine
                .diff_with_previous(previous, canonical, draft)
                .map_err(|e| PipelineError::DiffFailed { source: e.into() })?;
            if !quiet {
                tracing::info!(
                    "Reconciled with previous change list: {} kept, {} added, {} dropped",
                    stats.kept,
                    stats.added,
                    stats.dropped
                );
            }
            result
        }
        None => engine
            .diff(canonical, draft)
            .map_err(|e| PipelineError::DiffFailed { source: e.into() })?,
    };

    if !quiet {
        tracing::info!(
            "Diff complete: {} changes ({} created, {} modified, {} removed), {} restrictions",
            result.summary.total_changes,
            result.summary.created,
            result.summary.modified,
            result.summary.removed,
            result.summary.restrictions
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Iri, Literal, Triple};

    fn graph(label: &str) -> Graph {
        std::iter::once(Triple::new(
            Iri::new("https://example.org/a"),
            Iri::new(crate::model::vocab::SKOS_PREF_LABEL),
            Literal::lang(label, "cs"),
        ))
        .collect()
    }

    #[test]
    fn test_compute_diff_uses_configured_namespace() {
        let mut config = AppConfig::default();
        config.behavior.quiet = true;
        config.diff.change_namespace = "urn:test:".to_string();

        let result = compute_diff(&config, &graph("a"), &graph("b"), None).unwrap();
        assert_eq!(result.summary.modified, 1);
        assert!(result.changes[0].id.as_str().starts_with("urn:test:"));
    }

    #[test]
    fn test_compute_diff_keeps_previous_identity() {
        let mut config = AppConfig::default();
        config.behavior.quiet = true;

        let first = compute_diff(&config, &graph("a"), &graph("b"), None).unwrap();
        let mut previous = first.changes.clone();
        previous[0].approve("alice");

        let second = compute_diff(&config, &graph("a"), &graph("b"), Some(&previous)).unwrap();
        assert_eq!(second.changes, previous);
    }

    #[test]
    fn test_strict_failure_is_diff_error() {
        let mut config = AppConfig::default();
        config.behavior.quiet = true;
        config.diff.strict_modifications = true;

        let canonical = graph("a");
        let draft: Graph = std::iter::once(Triple::new(
            Iri::new("https://example.org/a"),
            Iri::new(crate::model::vocab::SKOS_PREF_LABEL),
            Iri::new("https://example.org/label"),
        ))
        .collect();
        let err = compute_diff(&config, &canonical, &draft, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::DiffFailed { .. })
        ));
    }
}
