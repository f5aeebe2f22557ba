//! Input loading stage.
//!
//! Reads the two graph versions and, optionally, a previously persisted
//! change list.

use super::PipelineError;
use crate::model::{Change, Graph};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Parse a graph file, attaching the path to any failure.
pub fn parse_graph_with_context(path: &Path, quiet: bool) -> Result<Graph> {
    if !quiet {
        tracing::info!("Parsing graph: {}", path.display());
    }

    let graph = crate::parsers::parse_graph(path).map_err(|e| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if !quiet {
        tracing::info!(
            triples = graph.len(),
            anonymous_nodes = graph.anon_count(),
            "Parsed {}",
            path.display()
        );
    }
    Ok(graph)
}

/// A persisted change list: either a bare JSON array or a JSON report
/// carrying a `changes` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedChanges {
    List(Vec<Change>),
    Report { changes: Vec<Change> },
}

/// Load the change list persisted by an earlier run.
pub fn load_previous_changes(path: &Path, quiet: bool) -> Result<Vec<Change>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read change list: {}", path.display()))?;
    let persisted: PersistedChanges = serde_json::from_str(&content).map_err(|e| {
        PipelineError::ParseFailed {
            path: path.display().to_string(),
            source: e.into(),
        }
    })?;
    let changes = match persisted {
        PersistedChanges::List(changes) | PersistedChanges::Report { changes } => changes,
    };

    if !quiet {
        tracing::info!("Loaded {} previous changes from {}", changes.len(), path.display());
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, Iri, ObjectValue};
    use std::io::Write;

    fn change() -> Change {
        Change::named(
            Iri::new("urn:change:1"),
            ChangeType::Created,
            Iri::new("https://example.org/a"),
            Iri::new("https://example.org/p"),
            ObjectValue::Iri(Iri::new("https://example.org/b")),
        )
    }

    #[test]
    fn test_parse_graph_with_context() {
        let mut file = tempfile::Builder::new().suffix(".nt").tempfile().unwrap();
        writeln!(file, "<https://example.org/a> <https://example.org/p> _:x .").unwrap();
        let graph = parse_graph_with_context(file.path(), true).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.anon_count(), 1);
    }

    #[test]
    fn test_parse_failure_names_path() {
        let mut file = tempfile::Builder::new().suffix(".nt").tempfile().unwrap();
        writeln!(file, "<https://example.org/a> <https://example.org/p> .").unwrap();
        let err = parse_graph_with_context(file.path(), true).unwrap_err();
        let pipeline = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(pipeline, PipelineError::ParseFailed { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_load_previous_from_array_and_report() {
        let dir = tempfile::tempdir().unwrap();

        let list_path = dir.path().join("list.json");
        std::fs::write(&list_path, serde_json::to_string(&vec![change()]).unwrap()).unwrap();
        assert_eq!(load_previous_changes(&list_path, true).unwrap(), vec![change()]);

        let report_path = dir.path().join("report.json");
        let report = serde_json::json!({ "summary": {}, "changes": [change()] });
        std::fs::write(&report_path, report.to_string()).unwrap();
        assert_eq!(load_previous_changes(&report_path, true).unwrap(), vec![change()]);
    }

    #[test]
    fn test_load_previous_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"nothing\": true}").unwrap();
        assert!(load_previous_changes(&path, true).is_err());
    }
}
