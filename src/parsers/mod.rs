//! RDF graph parsers.
//!
//! This module loads N-Triples and Turtle documents into the [`Graph`]
//! model. Blank-node labels of a document are mapped to fresh graph-local
//! ids, so two loaded graphs never share anonymous identities.
//!
//! ## Usage
//!
//! ```no_run
//! use vocab_diff::parsers::{parse_graph, parse_graph_str, GraphFormat};
//! use std::path::Path;
//!
//! // Detect the syntax from the extension or the content
//! let canonical = parse_graph(Path::new("canonical.ttl")).unwrap();
//!
//! // Parse a known syntax from memory
//! let draft = parse_graph_str("<http://e/a> <http://e/b> <http://e/c> .", GraphFormat::NTriples).unwrap();
//! ```

mod convert;
mod detection;
mod rdf;
mod traits;

pub use detection::{DetectionResult, FormatDetector, GraphFormat, MIN_CONFIDENCE_THRESHOLD};
pub use rdf::{NTriplesGraphParser, TurtleGraphParser};
pub use traits::{FormatConfidence, GraphParser};

use crate::error::{ErrorContext, Result, VocabDiffError};
use crate::model::Graph;
use std::path::Path;

/// Maximum graph file size (256 MB).
const MAX_GRAPH_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Detect the syntax of a file and parse it
///
/// Returns an error if the file exceeds [`MAX_GRAPH_FILE_SIZE`] to prevent
/// OOM, or if no syntax can be detected.
pub fn parse_graph(path: &Path) -> Result<Graph> {
    let metadata = std::fs::metadata(path).map_err(|e| VocabDiffError::io(path, e))?;
    if metadata.len() > MAX_GRAPH_FILE_SIZE {
        return Err(VocabDiffError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_GRAPH_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| VocabDiffError::io(path, e))?;

    let detection = FormatDetector::new().detect(path, &content);
    let format = detection
        .format
        .ok_or_else(|| VocabDiffError::unknown_format(path.display().to_string()))?;

    let graph = parse_graph_str(&content, format)
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        format = %format,
        triples = graph.len(),
        "loaded graph"
    );
    Ok(graph)
}

/// Parse a graph in a known syntax from string content
pub fn parse_graph_str(content: &str, format: GraphFormat) -> Result<Graph> {
    format.parser().parse_str(content)
}

/// Detect the syntax of `content` without parsing
pub fn detect_format(content: &str) -> Option<GraphFormat> {
    FormatDetector::new().detect_from_content(content).format
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_graph_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".nt")
            .tempfile()
            .expect("temp file");
        writeln!(file, "<http://e/a> <http://e/b> \"c\" .").expect("write");
        let graph = parse_graph(file.path()).expect("parse");
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_graph(Path::new("/nonexistent/vocab.ttl")).expect_err("missing");
        assert!(matches!(err, VocabDiffError::Io { .. }));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format("@prefix ex: <http://e/> .\nex:a ex:b ex:c ."),
            Some(GraphFormat::Turtle)
        );
    }
}
