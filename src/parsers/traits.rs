//! Parser trait definitions.
//!
//! This module defines the `GraphParser` trait for syntax-specific parsers
//! and the confidence scores used for syntax detection.

use crate::error::{Result, VocabDiffError};
use crate::model::Graph;
use std::path::Path;

/// Confidence level for format detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// No confidence - definitely not this format
    pub const NONE: Self = Self(0.0);
    /// Low confidence - might be this format
    pub const LOW: Self = Self(0.25);
    /// Medium confidence - likely this format
    pub const MEDIUM: Self = Self(0.5);
    /// High confidence - almost certainly this format
    pub const HIGH: Self = Self(0.75);

    /// Get the confidence value
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if this confidence indicates the format can be parsed
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.0 >= 0.25
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// Trait for RDF syntax parsers
///
/// Implementors provide detection via `detect()` and parsing via
/// `parse_str()`. Every call to `parse_str()` yields a graph with its own
/// anonymous-node id space.
pub trait GraphParser {
    /// Parse a graph from a file path
    fn parse(&self, path: &Path) -> Result<Graph> {
        let content =
            std::fs::read_to_string(path).map_err(|e| VocabDiffError::io(path, e))?;
        self.parse_str(&content)
    }

    /// Parse a graph from string content
    fn parse_str(&self, content: &str) -> Result<Graph>;

    /// Get format name
    fn format_name(&self) -> &str;

    /// Lightweight check of how likely `content` is in this syntax.
    fn detect(&self, content: &str) -> FormatConfidence;
}
