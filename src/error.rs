//! Unified error types for vocab-diff.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vocab-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum VocabDiffError {
    /// Errors while loading a graph
    #[error("Failed to parse graph: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Fatal inconsistencies found while classifying changes
    #[error("Change classification failed: {context}")]
    Classification {
        context: String,
        #[source]
        source: ClassificationErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Unknown RDF syntax - expected N-Triples or Turtle")]
    UnknownFormat,

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Invalid base IRI: {0}")]
    InvalidBaseIri(String),
}

/// Data-integrity errors raised by the change engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClassificationErrorKind {
    /// A triple expected to be modified has no counterpart of a compatible
    /// object kind in the draft.
    #[error("No compatible modification found for {triple}")]
    IncompatibleModification { triple: String },

    /// A term is neither an IRI, a literal nor an anonymous node.
    #[error("Unrecognized RDF term kind: {term}")]
    UnrecognizedTerm { term: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for vocab-diff operations
pub type Result<T> = std::result::Result<T, VocabDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl VocabDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for an undetectable syntax
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::parse(format!("at {}", path.into()), ParseErrorKind::UnknownFormat)
    }

    /// Create a classification error with context
    pub fn classification(context: impl Into<String>, source: ClassificationErrorKind) -> Self {
        Self::Classification {
            context: context.into(),
            source,
        }
    }

    /// Classification error for a triple with no compatible modification
    pub fn incompatible_modification(triple: impl ToString) -> Self {
        Self::classification(
            "statement diff",
            ClassificationErrorKind::IncompatibleModification {
                triple: triple.to_string(),
            },
        )
    }

    /// Classification error for an RDF term of an unknown kind
    pub fn unrecognized_term(term: impl ToString) -> Self {
        Self::classification(
            "term conversion",
            ClassificationErrorKind::UnrecognizedTerm {
                term: term.to_string(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Whether this error signals a malformed or inconsistent source graph.
    #[must_use]
    pub const fn is_data_integrity(&self) -> bool {
        matches!(self, Self::Classification { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for VocabDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for VocabDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerializationError(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
///
/// ```ignore
/// use vocab_diff::error::ErrorContext;
///
/// let graph = parse_graph(path).with_context(|| format!("loading draft {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<VocabDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: VocabDiffError, new_ctx: &str) -> VocabDiffError {
    match err {
        VocabDiffError::Parse {
            context: existing,
            source,
        } => VocabDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VocabDiffError::Classification {
            context: existing,
            source,
        } => VocabDiffError::Classification {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VocabDiffError::Report {
            context: existing,
            source,
        } => VocabDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VocabDiffError::Io {
            path,
            message,
            source,
        } => VocabDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        VocabDiffError::Config(msg) => VocabDiffError::Config(chain_context(new_ctx, &msg)),
        VocabDiffError::Validation(msg) => {
            VocabDiffError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| VocabDiffError::Validation(context.into()))
    }
}
