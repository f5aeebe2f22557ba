//! Syntax detection for graph files.
//!
//! The file extension decides when it is known; otherwise every parser
//! scores the content and the most confident one wins.

use super::rdf::{NTriplesGraphParser, TurtleGraphParser};
use super::traits::{FormatConfidence, GraphParser};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum confidence threshold for accepting a format detection.
pub const MIN_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// Supported RDF syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphFormat {
    NTriples,
    Turtle,
}

impl GraphFormat {
    /// Get the human-readable name for this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NTriples => "N-Triples",
            Self::Turtle => "Turtle",
        }
    }

    /// Format implied by a file extension, if any.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "nt" => Some(Self::NTriples),
            "ttl" | "turtle" => Some(Self::Turtle),
            _ => None,
        }
    }

    /// Parser for this format.
    #[must_use]
    pub fn parser(&self) -> Box<dyn GraphParser> {
        match self {
            Self::NTriples => Box::new(NTriplesGraphParser::new()),
            Self::Turtle => Box::new(TurtleGraphParser::new()),
        }
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of format detection.
#[derive(Debug, Clone, Copy)]
pub struct DetectionResult {
    /// The detected format, if any.
    pub format: Option<GraphFormat>,
    /// Confidence level of the detection.
    pub confidence: FormatConfidence,
}

impl DetectionResult {
    /// Check if the detection is confident enough to parse.
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.format.is_some() && self.confidence.value() >= MIN_CONFIDENCE_THRESHOLD
    }
}

/// Centralized format detector for graph content.
#[derive(Debug, Default)]
pub struct FormatDetector {
    ntriples: NTriplesGraphParser,
    turtle: TurtleGraphParser,
}

impl FormatDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect format from full content string.
    ///
    /// Ties go to N-Triples, the stricter syntax.
    #[must_use]
    pub fn detect_from_content(&self, content: &str) -> DetectionResult {
        let nt = self.ntriples.detect(content);
        let ttl = self.turtle.detect(content);
        let (format, confidence) = if nt >= ttl {
            (GraphFormat::NTriples, nt)
        } else {
            (GraphFormat::Turtle, ttl)
        };
        tracing::debug!(format = %format, confidence = confidence.value(), "detected graph syntax");
        DetectionResult {
            format: confidence.can_parse().then_some(format),
            confidence,
        }
    }

    /// Detect from the path first and fall back to the content.
    #[must_use]
    pub fn detect(&self, path: &Path, content: &str) -> DetectionResult {
        match GraphFormat::from_extension(path) {
            Some(format) => DetectionResult {
                format: Some(format),
                confidence: FormatConfidence::HIGH,
            },
            None => self.detect_from_content(content),
        }
    }
}
