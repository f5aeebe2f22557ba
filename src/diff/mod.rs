//! Structural change detection between RDF graphs.
//!
//! The engine compares a canonical graph with a draft in two phases. Plain
//! triples are diffed as sets and paired into modifications; anonymous
//! subtrees are treated as values, so subtrees that only differ in their
//! blank-node numbering cancel out. The flat result is then folded into
//! composite restriction changes.
//!
//! # Architecture
//!
//! The diff system is built on traits for extensibility:
//!
//! - [`ChangeComputer`](traits::ChangeComputer): Trait for computing one phase of changes
//! - Individual change computers in the [`changes`] module
//! - [`ChangeResolver`] runs the computers, [`ChangeComposer`] folds the result
//!
//! # Example
//!
//! ```ignore
//! use vocab_diff::diff::DiffEngine;
//!
//! let engine = DiffEngine::new();
//! let result = engine.diff(&canonical, &draft)?;
//!
//! // Carry identities and verdicts over from a persisted list:
//! let (result, stats) = engine.diff_with_previous(&persisted, &canonical, &draft)?;
//! println!("kept {} of {} changes", stats.kept, persisted.len());
//! ```

pub mod changes;
mod composer;
mod engine;
mod engine_config;
mod isomorphism;
mod labels;
mod reconcile;
mod resolver;
mod result;
mod statements;
mod subgraph;
pub mod traits;

pub use composer::{
    Cardinality, ChangeComposer, ClassRef, ComposedChange, RestrictionChange, RestrictionSide,
    ValueChange,
};
pub use engine::{DiffEngine, DiffEngineConfig};
pub use isomorphism::{IsomorphismMatcher, MatchStats};
pub use labels::LabelResolver;
pub use reconcile::{reconcile, ReconcileStats};
pub use resolver::ChangeResolver;
pub use result::{DiffResult, DiffSummary};
pub use statements::{
    ClassificationMode, ClassifiedStatement, StatementDiff, StatementDiffer, TriplesBySubject,
};
pub use subgraph::{reachable_nodes, SubgraphExtractor, SubgraphsByRoot};
pub use traits::{ChangeComputer, ChangeContext};
