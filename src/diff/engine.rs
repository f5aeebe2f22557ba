//! Vocabulary diff engine implementation.

pub use super::engine_config::DiffEngineConfig;
use super::composer::{ChangeComposer, ComposedChange};
use super::labels::LabelResolver;
use super::reconcile::{reconcile, ReconcileStats};
use super::resolver::ChangeResolver;
use super::statements::ClassificationMode;
use super::DiffResult;
use crate::error::Result;
use crate::model::{Change, Graph, IdentifierGenerator, UuidIdentifierGenerator};

/// Change-detection engine comparing a canonical graph with a draft.
pub struct DiffEngine {
    config: DiffEngineConfig,
    identifiers: Box<dyn IdentifierGenerator>,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    pub fn new() -> Self {
        Self {
            config: DiffEngineConfig::default(),
            identifiers: Box::new(UuidIdentifierGenerator::default()),
        }
    }

    /// Replace the whole engine configuration
    pub fn with_config(mut self, config: DiffEngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the source of change identities
    pub fn with_identifiers(mut self, identifiers: Box<dyn IdentifierGenerator>) -> Self {
        self.identifiers = identifiers;
        self
    }

    /// Set the classification mode
    pub fn with_mode(mut self, mode: ClassificationMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Enable or disable restriction composition
    pub fn compose_restrictions(mut self, compose: bool) -> Self {
        self.config.compose_restrictions = compose;
        self
    }

    /// Set the label predicates, in order of preference
    pub fn with_label_predicates(mut self, predicates: Vec<String>) -> Self {
        self.config.label_predicates = predicates;
        self
    }

    /// Compute composite review states for one reviewer
    pub fn with_reviewer(mut self, reviewer: impl Into<String>) -> Self {
        self.config.reviewer = Some(reviewer.into());
        self
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &DiffEngineConfig {
        &self.config
    }

    /// Compare two graphs and return the diff result
    pub fn diff(&self, canonical: &Graph, draft: &Graph) -> Result<DiffResult> {
        let hashes = (canonical.content_hash(), draft.content_hash());
        if is_unchanged(canonical, draft, hashes) {
            tracing::debug!("graphs are identical, skipping change resolution");
            return Ok(DiffResult::new());
        }

        let changes = ChangeResolver::new()
            .with_label_predicates(self.config.label_predicates.clone())
            .with_mode(self.config.mode)
            .resolve(canonical, draft, self.identifiers.as_ref())?;

        let composed = self.compose(changes.clone(), canonical, draft);
        Ok(DiffResult::from_changes(changes, composed))
    }

    /// Compare two graphs and merge the outcome into a persisted change list.
    ///
    /// Changes reproduced by the recomputation keep their persisted identity
    /// and verdicts; composition runs over the merged list.
    pub fn diff_with_previous(
        &self,
        previous: &[Change],
        canonical: &Graph,
        draft: &Graph,
    ) -> Result<(DiffResult, ReconcileStats)> {
        let recomputed = self.diff(canonical, draft)?;
        let (changes, stats) = reconcile(previous, recomputed.changes);
        let composed = self.compose(changes.clone(), canonical, draft);
        Ok((DiffResult::from_changes(changes, composed), stats))
    }

    fn compose(&self, changes: Vec<Change>, canonical: &Graph, draft: &Graph) -> Vec<ComposedChange> {
        if !self.config.compose_restrictions {
            return changes.into_iter().map(ComposedChange::Atomic).collect();
        }
        let mut labels = LabelResolver::new(canonical, draft, &self.config.label_predicates);
        let composer = match &self.config.reviewer {
            Some(reviewer) => ChangeComposer::new().with_reviewer(reviewer.clone()),
            None => ChangeComposer::new(),
        };
        composer.compose(changes, &mut labels)
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fast path for identical graphs.
///
/// Equal content hashes are only a hint; the triples are compared before the
/// graphs are declared identical.
fn is_unchanged(canonical: &Graph, draft: &Graph, (canonical_hash, draft_hash): (u64, u64)) -> bool {
    if canonical_hash != draft_hash || canonical_hash == 0 {
        return false;
    }
    let same = canonical.len() == draft.len() && canonical.iter().all(|t| draft.contains(t));
    if !same {
        tracing::debug!(hash = canonical_hash, "content hash collision");
    }
    same
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{vocab, Iri, Literal, SequentialIdentifierGenerator, Triple};

    fn engine() -> DiffEngine {
        DiffEngine::new().with_identifiers(Box::new(SequentialIdentifierGenerator::new("urn:change:")))
    }

    #[test]
    fn test_empty_diff() {
        let graph = Graph::new();
        let result = engine().diff(&graph, &graph).expect("diff should succeed");
        assert!(!result.has_changes());
    }

    #[test]
    fn test_content_hash_fast_path() {
        let graph: Graph = vec![Triple::new(
            Iri::new("http://example.org/A"),
            vocab::SKOS_PREF_LABEL,
            Literal::lang("Dog", "en"),
        )]
        .into_iter()
        .collect();
        let result = engine().diff(&graph, &graph.clone()).expect("diff should succeed");
        assert!(result.composed.is_empty());
        assert_eq!(result.summary.total_changes, 0);
    }

    #[test]
    fn test_equal_hashes_are_confirmed() {
        let a = Iri::new("http://example.org/A");
        let canonical: Graph =
            std::iter::once(Triple::new(a.clone(), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en")))
                .collect();
        let draft: Graph =
            std::iter::once(Triple::new(a, vocab::SKOS_PREF_LABEL, Literal::lang("Pes", "cs")))
                .collect();

        // Same length, different triples: a colliding hash must not hide the change.
        assert!(!is_unchanged(&canonical, &draft, (42, 42)));
        assert!(is_unchanged(&canonical, &canonical.clone(), (42, 42)));
        assert!(!is_unchanged(&canonical, &canonical.clone(), (42, 43)));
    }

    #[test]
    fn test_flat_config_skips_composition() {
        let mut draft = Graph::new();
        let node = draft.fresh_anon();
        draft.insert(Triple::new(Iri::new("http://example.org/R"), "http://e/sub", node));
        draft.insert(Triple::new(node, vocab::RDF_TYPE, Iri::new(vocab::OWL_RESTRICTION)));
        draft.insert(Triple::new(node, vocab::OWL_ON_PROPERTY, Iri::new(vocab::MA_VZTAZENY_PRVEK_1)));

        let composed = engine().diff(&Graph::new(), &draft).expect("diff");
        assert_eq!(composed.summary.restrictions, 1);
        assert_eq!(composed.composed.len(), 1);

        let flat = engine()
            .with_config(DiffEngineConfig::flat())
            .diff(&Graph::new(), &draft)
            .expect("diff");
        assert_eq!(flat.summary.restrictions, 0);
        assert_eq!(flat.composed.len(), 3);
    }

    #[test]
    fn test_diff_with_previous_keeps_verdicts() {
        let canonical = Graph::new();
        let draft: Graph = vec![Triple::new(
            Iri::new("http://example.org/A"),
            vocab::SKOS_PREF_LABEL,
            Literal::lang("Dog", "en"),
        )]
        .into_iter()
        .collect();

        let mut first = engine().diff(&canonical, &draft).expect("diff").changes;
        first[0].approve("alice");

        let fresh = DiffEngine::new();
        let (result, stats) = fresh
            .diff_with_previous(&first, &canonical, &draft)
            .expect("diff");
        assert_eq!(stats.kept, 1);
        assert_eq!(result.changes, first);
    }
}
