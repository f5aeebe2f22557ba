//! Orchestration of the change phases into one flat, ordered change list.

use super::changes::{BlankNodeChangeComputer, StatementChangeComputer};
use super::labels::LabelResolver;
use super::statements::ClassificationMode;
use super::traits::{ChangeComputer, ChangeContext};
use crate::error::{ErrorContext, Result};
use crate::model::{vocab, Change, Graph, IdentifierGenerator};

/// Runs the plain-statement phase and then the anonymous-subtree phase.
///
/// Output order: flat Created, Modified and Removed changes, then blank
/// Created roots with their descendants, then blank Removed roots with
/// theirs.
pub struct ChangeResolver {
    computers: Vec<Box<dyn ChangeComputer>>,
    label_predicates: Vec<String>,
    mode: ClassificationMode,
}

impl ChangeResolver {
    /// Resolver with the default label predicates and lenient classification.
    #[must_use]
    pub fn new() -> Self {
        Self {
            computers: vec![
                Box::new(StatementChangeComputer::new()),
                Box::new(BlankNodeChangeComputer::new()),
            ],
            label_predicates: vocab::DEFAULT_LABEL_PREDICATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            mode: ClassificationMode::default(),
        }
    }

    /// Label predicates in order of preference.
    #[must_use]
    pub fn with_label_predicates(mut self, predicates: Vec<String>) -> Self {
        self.label_predicates = predicates;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ClassificationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Compute the flat change list between `canonical` and `draft`.
    pub fn resolve(
        &self,
        canonical: &Graph,
        draft: &Graph,
        identifiers: &dyn IdentifierGenerator,
    ) -> Result<Vec<Change>> {
        let labels = LabelResolver::new(canonical, draft, &self.label_predicates);
        let mut ctx = ChangeContext::new(identifiers, labels, self.mode);

        let mut changes = Vec::new();
        for computer in &self.computers {
            let produced = computer
                .compute(canonical, draft, &mut ctx)
                .with_context(|| format!("{} failed", computer.name()))?;
            tracing::debug!(computer = computer.name(), changes = produced.len(), "phase complete");
            changes.extend(produced);
        }
        Ok(changes)
    }
}

impl Default for ChangeResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, Iri, Literal, SequentialIdentifierGenerator, Triple};

    fn a() -> Iri {
        Iri::new("http://example.org/A")
    }

    #[test]
    fn test_identical_graphs_yield_nothing() {
        let mut graph = Graph::new();
        graph.insert(Triple::new(a(), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en")));
        let node = graph.fresh_anon();
        graph.insert(Triple::new(a(), "http://e/p", node));
        graph.insert(Triple::new(node, "http://e/q", Literal::plain("x")));

        let ids = SequentialIdentifierGenerator::new("urn:change:");
        let changes = ChangeResolver::new()
            .resolve(&graph, &graph, &ids)
            .expect("resolve");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_flat_changes_precede_blank_changes() {
        let canonical = Graph::new();
        let mut draft = Graph::new();
        let node = draft.fresh_anon();
        draft.insert(Triple::new(a(), "http://e/p", node));
        draft.insert(Triple::new(node, "http://e/q", Literal::plain("x")));
        draft.insert(Triple::new(a(), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en")));

        let ids = SequentialIdentifierGenerator::new("urn:change:");
        let changes = ChangeResolver::new()
            .resolve(&canonical, &draft, &ids)
            .expect("resolve");
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].predicate, vocab::SKOS_PREF_LABEL);
        assert!(changes[1].points_at_blank_node());
        assert!(changes[2].is_in_blank_node());
        assert!(changes.iter().all(|c| c.change_type == ChangeType::Created));
    }

    #[test]
    fn test_strict_mode_propagates_error() {
        let canonical: Graph = vec![Triple::new(a(), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en"))]
            .into_iter()
            .collect();
        let draft: Graph = vec![Triple::new(a(), vocab::SKOS_PREF_LABEL, Iri::new("http://e/Dog"))]
            .into_iter()
            .collect();
        let ids = SequentialIdentifierGenerator::new("urn:change:");
        let err = ChangeResolver::new()
            .with_mode(ClassificationMode::Strict)
            .resolve(&canonical, &draft, &ids)
            .expect_err("strict");
        assert!(err.is_data_integrity());
        assert!(err.to_string().contains("StatementChangeComputer"));
    }
}
