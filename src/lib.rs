//! **Semantic change detection and review composition for RDF/OWL vocabularies.**
//!
//! `vocab-diff` compares a published (canonical) version of a vocabulary with a
//! work-in-progress draft and produces a reviewable list of changes. Plain
//! statements are classified as created, modified or removed. Anonymous
//! subtrees are matched up to isomorphism, so that renaming blank nodes is not
//! a change, and differing subtrees are expanded into parent/child change
//! records. OWL cardinality restrictions that describe one relation are then
//! folded into a single composite change reporting the cardinality and class
//! on both sides of the relation.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Triples, the [`Graph`] container with graph-local anonymous
//!   node keys, and the [`Change`] records produced for review.
//! - **[`diff`]**: Home of the [`DiffEngine`] and the stages it runs: statement
//!   diffing, subgraph extraction, isomorphism matching, change resolution and
//!   restriction composition. [`diff::reconcile`] merges a recomputation with a
//!   persisted change list so that reviewer verdicts survive.
//! - **[`parsers`]**: N-Triples and Turtle loading with format detection.
//! - **[`reports`]**: JSON, summary and table renderings of a diff result.
//! - **[`pipeline`]** and **[`cli`]**: The parse → diff → report workflow used
//!   by the `vocab-diff` binary.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use vocab_diff::{parse_graph, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let canonical = parse_graph(Path::new("published.ttl"))?;
//!     let draft = parse_graph(Path::new("draft.ttl"))?;
//!
//!     let result = DiffEngine::new().diff(&canonical, &draft)?;
//!
//!     println!("{} changes", result.summary.total_changes);
//!     for entry in &result.composed {
//!         if let Some(restriction) = entry.as_restriction() {
//!             println!(
//!                 "{} {}: start min {:?} -> {:?}",
//!                 restriction.change_type,
//!                 restriction.relation,
//!                 restriction.start.cardinality.min.old,
//!                 restriction.start.cardinality.min.new,
//!             );
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Building graphs in memory
//!
//! ```
//! use vocab_diff::model::{Graph, Iri, Literal, Triple, vocab};
//! use vocab_diff::DiffEngine;
//!
//! let concept = Iri::new("https://example.org/pojem/osoba");
//! let canonical: Graph = std::iter::once(Triple::new(
//!     concept.clone(),
//!     vocab::SKOS_PREF_LABEL,
//!     Literal::lang("Osoba", "cs"),
//! ))
//! .collect();
//! let draft = Graph::new();
//!
//! let result = DiffEngine::new().diff(&canonical, &draft).unwrap();
//! assert_eq!(result.summary.removed, 1);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{BehaviorConfig, DiffConfig, DiffPaths, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    ChangeComposer, ChangeResolver, ComposedChange, DiffEngine, DiffResult, RestrictionChange,
};
pub use error::{ErrorContext, OptionContext, Result, VocabDiffError};
pub use model::{Change, ChangeType, Graph, ReviewState, Triple};
pub use parsers::{parse_graph, parse_graph_str, GraphFormat, GraphParser};
pub use reports::{ReportFormat, ReportGenerator};
