//! Data model for graphs and change records.
//!
//! Graphs are normalized into [`Graph`] regardless of their source syntax.
//! Anonymous nodes are represented by graph-local [`AnonId`] keys, and every
//! difference the engine finds is reported as a [`Change`].

mod change;
mod graph;
mod identifiers;
mod term;
pub mod vocab;

pub use change::*;
pub use graph::*;
pub use identifiers::*;
pub use term::*;
