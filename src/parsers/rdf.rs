//! N-Triples and Turtle parsers backed by `oxttl`.

use super::convert::GraphBuilder;
use super::traits::{FormatConfidence, GraphParser};
use crate::error::{ParseErrorKind, Result, VocabDiffError};
use crate::model::Graph;

/// Parser for N-Triples documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NTriplesGraphParser;

impl NTriplesGraphParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GraphParser for NTriplesGraphParser {
    fn parse_str(&self, content: &str) -> Result<Graph> {
        let mut builder = GraphBuilder::new();
        for triple in oxttl::NTriplesParser::new().for_reader(content.as_bytes()) {
            let triple = triple.map_err(|e| {
                VocabDiffError::parse("N-Triples", ParseErrorKind::Syntax(e.to_string()))
            })?;
            builder.push(triple)?;
        }
        Ok(builder.finish())
    }

    fn format_name(&self) -> &str {
        "N-Triples"
    }

    fn detect(&self, content: &str) -> FormatConfidence {
        let mut lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .take(20)
            .peekable();
        if lines.peek().is_none() {
            return FormatConfidence::LOW;
        }
        let statement_like = lines.all(|l| {
            (l.starts_with('<') || l.starts_with("_:")) && l.ends_with('.')
        });
        if statement_like {
            FormatConfidence::HIGH
        } else {
            FormatConfidence::NONE
        }
    }
}

/// Parser for Turtle documents.
#[derive(Debug, Clone, Default)]
pub struct TurtleGraphParser {
    base_iri: Option<String>,
}

impl TurtleGraphParser {
    #[must_use]
    pub const fn new() -> Self {
        Self { base_iri: None }
    }

    /// Resolve relative IRIs against `base_iri`.
    #[must_use]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }
}

impl GraphParser for TurtleGraphParser {
    fn parse_str(&self, content: &str) -> Result<Graph> {
        let mut parser = oxttl::TurtleParser::new();
        if let Some(base) = &self.base_iri {
            parser = parser.with_base_iri(base.as_str()).map_err(|e| {
                VocabDiffError::parse("Turtle", ParseErrorKind::InvalidBaseIri(e.to_string()))
            })?;
        }

        let mut builder = GraphBuilder::new();
        for triple in parser.for_reader(content.as_bytes()) {
            let triple = triple.map_err(|e| {
                VocabDiffError::parse("Turtle", ParseErrorKind::Syntax(e.to_string()))
            })?;
            builder.push(triple)?;
        }
        Ok(builder.finish())
    }

    fn format_name(&self) -> &str {
        "Turtle"
    }

    fn detect(&self, content: &str) -> FormatConfidence {
        let head: String = content.chars().take(4096).collect();
        let lower = head.to_ascii_lowercase();
        if lower.contains("@prefix") || lower.contains("@base") || lower.contains("prefix ") {
            FormatConfidence::HIGH
        } else if head.contains(';') || head.contains('[') || head.contains(" a ") {
            FormatConfidence::MEDIUM
        } else if head.trim_start().starts_with('<') {
            // Any N-Triples document is also valid Turtle.
            FormatConfidence::LOW
        } else {
            FormatConfidence::NONE
        }
    }
}
