//! Trait definitions for change computation phases.
//!
//! Each phase of change resolution implements [`ChangeComputer`]; the
//! resolver runs them in order over a shared [`ChangeContext`].

use super::labels::LabelResolver;
use super::statements::ClassificationMode;
use crate::error::Result;
use crate::model::{Change, Graph, IdentifierGenerator, Iri};

/// Per-invocation state shared by the change computers.
pub struct ChangeContext<'a> {
    /// Source of change identities
    pub identifiers: &'a dyn IdentifierGenerator,
    /// Label and subject-type lookups
    pub labels: LabelResolver<'a>,
    /// Classification mode for the statement phase
    pub mode: ClassificationMode,
}

impl<'a> ChangeContext<'a> {
    pub fn new(
        identifiers: &'a dyn IdentifierGenerator,
        labels: LabelResolver<'a>,
        mode: ClassificationMode,
    ) -> Self {
        Self {
            identifiers,
            labels,
            mode,
        }
    }

    /// Fresh identity for a change record.
    pub fn next_id(&self) -> Iri {
        self.identifiers.generate_identifier()
    }
}

/// Trait for computing one category of changes between two graphs.
pub trait ChangeComputer: Send + Sync {
    /// Compute changes between the canonical and the draft graph.
    fn compute(
        &self,
        canonical: &Graph,
        draft: &Graph,
        ctx: &mut ChangeContext<'_>,
    ) -> Result<Vec<Change>>;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}
