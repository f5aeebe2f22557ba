//! Change computer implementations.
//!
//! This module provides concrete implementations of the `ChangeComputer` trait
//! for each phase of change resolution: plain statements and anonymous
//! subtrees.

mod blank_nodes;
mod statements;

pub use blank_nodes::BlankNodeChangeComputer;
pub use statements::StatementChangeComputer;
