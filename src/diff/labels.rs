//! Label and subject-type lookup against the compared graphs.
//!
//! Lookups consult the draft graph first and fall back to the canonical
//! graph, so removed resources still get a label. Results are cached for the
//! lifetime of one resolver, which lives for a single engine invocation.

use crate::model::{vocab, Graph, Iri, MultilingualString, SubjectType};
use std::collections::HashMap;

/// Request-scoped label and type resolver.
#[derive(Debug)]
pub struct LabelResolver<'g> {
    canonical: &'g Graph,
    draft: &'g Graph,
    label_predicates: Vec<String>,
    labels: HashMap<Iri, MultilingualString>,
    types: HashMap<Iri, SubjectType>,
}

impl<'g> LabelResolver<'g> {
    /// Create a resolver using the given label predicates in order of
    /// preference.
    pub fn new(canonical: &'g Graph, draft: &'g Graph, label_predicates: &[String]) -> Self {
        Self {
            canonical,
            draft,
            label_predicates: label_predicates.to_vec(),
            labels: HashMap::new(),
            types: HashMap::new(),
        }
    }

    /// Resolver with the default predicates (`skos:prefLabel`, then
    /// `dc:title`).
    pub fn with_defaults(canonical: &'g Graph, draft: &'g Graph) -> Self {
        let predicates: Vec<String> = vocab::DEFAULT_LABEL_PREDICATES
            .iter()
            .map(ToString::to_string)
            .collect();
        Self::new(canonical, draft, &predicates)
    }

    /// Multilingual label of `subject`.
    ///
    /// The first predicate that yields any value wins; within it, the first
    /// value per language wins. No value at all gives an empty label.
    pub fn label(&mut self, subject: &Iri) -> MultilingualString {
        if let Some(cached) = self.labels.get(subject) {
            return cached.clone();
        }
        let label = self.lookup_label(subject);
        self.labels.insert(subject.clone(), label.clone());
        label
    }

    fn lookup_label(&self, subject: &Iri) -> MultilingualString {
        for predicate in &self.label_predicates {
            let mut label = MultilingualString::new();
            for graph in [self.draft, self.canonical] {
                for literal in graph
                    .objects(subject, predicate)
                    .filter_map(|v| v.as_literal())
                {
                    label.insert_if_absent(literal.language.as_deref(), literal.text.clone());
                }
                if !label.is_empty() {
                    return label;
                }
            }
        }
        MultilingualString::new()
    }

    /// Subject type from `rdf:type`: `skos:Concept` is a Term,
    /// `owl:Ontology` a Vocabulary, anything else Unknown.
    pub fn subject_type(&mut self, subject: &Iri) -> SubjectType {
        if let Some(cached) = self.types.get(subject) {
            return *cached;
        }
        let resolved = [self.draft, self.canonical]
            .into_iter()
            .find_map(|graph| {
                if graph.has_named(subject, vocab::RDF_TYPE, vocab::SKOS_CONCEPT) {
                    Some(SubjectType::Term)
                } else if graph.has_named(subject, vocab::RDF_TYPE, vocab::OWL_ONTOLOGY) {
                    Some(SubjectType::Vocabulary)
                } else {
                    None
                }
            })
            .unwrap_or(SubjectType::Unknown);
        self.types.insert(subject.clone(), resolved);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, Triple};

    fn a() -> Iri {
        Iri::new("http://example.org/A")
    }

    #[test]
    fn test_pref_label_preferred_over_title() {
        let draft: Graph = vec![
            Triple::new(a(), vocab::DCTERMS_TITLE, Literal::lang("Title", "en")),
            Triple::new(a(), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en")),
        ]
        .into_iter()
        .collect();
        let canonical = Graph::new();
        let mut resolver = LabelResolver::with_defaults(&canonical, &draft);
        assert_eq!(resolver.label(&a()).get("en"), Some("Dog"));
    }

    #[test]
    fn test_dcterms_title_only_when_configured() {
        let draft: Graph = vec![Triple::new(a(), vocab::DCTERMS_TITLE, Literal::lang("Title", "en"))]
            .into_iter()
            .collect();
        let canonical = Graph::new();

        let mut defaults = LabelResolver::with_defaults(&canonical, &draft);
        assert!(defaults.label(&a()).is_empty());

        let predicates = vec![
            vocab::SKOS_PREF_LABEL.to_string(),
            vocab::DCTERMS_TITLE.to_string(),
            vocab::DC_TITLE.to_string(),
        ];
        let mut configured = LabelResolver::new(&canonical, &draft, &predicates);
        assert_eq!(configured.label(&a()).get("en"), Some("Title"));
    }

    #[test]
    fn test_dc_title_is_the_default_fallback() {
        let draft: Graph = vec![Triple::new(a(), vocab::DC_TITLE, Literal::lang("Slovník", "cs"))]
            .into_iter()
            .collect();
        let canonical = Graph::new();
        let mut resolver = LabelResolver::with_defaults(&canonical, &draft);
        assert_eq!(resolver.label(&a()).get("cs"), Some("Slovník"));
    }

    #[test]
    fn test_falls_back_to_canonical_graph() {
        let canonical: Graph = vec![
            Triple::new(a(), vocab::SKOS_PREF_LABEL, Literal::lang("Pes", "cs")),
            Triple::new(a(), vocab::RDF_TYPE, Iri::new(vocab::SKOS_CONCEPT)),
        ]
        .into_iter()
        .collect();
        let draft = Graph::new();
        let mut resolver = LabelResolver::with_defaults(&canonical, &draft);
        assert_eq!(resolver.label(&a()).get("cs"), Some("Pes"));
        assert_eq!(resolver.subject_type(&a()), SubjectType::Term);
    }

    #[test]
    fn test_missing_label_is_empty() {
        let empty = Graph::new();
        let mut resolver = LabelResolver::with_defaults(&empty, &empty);
        assert!(resolver.label(&a()).is_empty());
        assert_eq!(resolver.subject_type(&a()), SubjectType::Unknown);
    }

    #[test]
    fn test_ontology_is_vocabulary() {
        let draft: Graph = vec![Triple::new(a(), vocab::RDF_TYPE, Iri::new(vocab::OWL_ONTOLOGY))]
            .into_iter()
            .collect();
        let mut resolver = LabelResolver::with_defaults(&draft, &draft);
        assert_eq!(resolver.subject_type(&a()), SubjectType::Vocabulary);
    }
}
