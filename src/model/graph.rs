//! In-memory RDF graph with set semantics.

use super::{AnonId, Iri, NodeRef, Triple, Value};
use indexmap::IndexSet;
use xxhash_rust::xxh3::xxh3_64;

/// An insertion-ordered set of triples that owns its anonymous-node id space.
///
/// Iteration order is the order in which triples were first inserted, which
/// keeps change emission deterministic for a given input.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
    next_anon: u32,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh anonymous node local to this graph.
    pub fn fresh_anon(&mut self) -> AnonId {
        let id = AnonId::new(self.next_anon);
        self.next_anon += 1;
        id
    }

    /// Insert a triple. Returns `false` if it was already present.
    ///
    /// Anonymous ids not issued by [`Graph::fresh_anon`] are accepted; the id
    /// counter is advanced past them so later allocations stay unique.
    pub fn insert(&mut self, triple: Triple) -> bool {
        for id in [triple.subject.as_anon(), triple.object.as_anon()].into_iter().flatten() {
            if id.index() >= self.next_anon {
                self.next_anon = id.index() + 1;
            }
        }
        self.triples.insert(triple)
    }

    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples with neither an anonymous subject nor an anonymous object.
    pub fn plain_triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter().filter(|t| t.is_plain())
    }

    /// Number of anonymous ids issued so far.
    #[must_use]
    pub const fn anon_count(&self) -> u32 {
        self.next_anon
    }

    /// Objects of `(subject, predicate, ?)`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Iri,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.triples.iter().filter_map(move |t| match &t.subject {
            NodeRef::Named(s) if s == subject && t.predicate == predicate => Some(&t.object),
            _ => None,
        })
    }

    /// Whether `(subject, predicate, object)` holds for a named object.
    #[must_use]
    pub fn has_named(&self, subject: &Iri, predicate: &str, object: &str) -> bool {
        self.objects(subject, predicate)
            .any(|o| o.as_named().is_some_and(|iri| iri == object))
    }

    /// Order-independent content hash.
    ///
    /// Anonymous ids take part in the hash, so two graphs only hash equal when
    /// they were built with the same blank numbering (e.g. parsed from the
    /// same document). Used as a fast path, never as proof of difference.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        if self.triples.is_empty() {
            return 0;
        }
        let mut lines: Vec<String> = self.triples.iter().map(ToString::to_string).collect();
        lines.sort_unstable();
        xxh3_64(lines.join("\n").as_bytes())
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{vocab, Literal};

    fn iri(s: &str) -> Iri {
        Iri::new(format!("http://example.org/{s}"))
    }

    #[test]
    fn test_set_semantics() {
        let mut graph = Graph::new();
        let t = Triple::new(iri("a"), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en"));
        assert!(graph.insert(t.clone()));
        assert!(!graph.insert(t));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_fresh_anon_skips_inserted_ids() {
        let mut graph = Graph::new();
        let first = graph.fresh_anon();
        graph.insert(Triple::new(iri("a"), "http://e/p", Value::Anonymous(AnonId::new(5))));
        let next = graph.fresh_anon();
        assert_eq!(first.index(), 0);
        assert_eq!(next.index(), 6);
    }

    #[test]
    fn test_content_hash_order_independent() {
        let t1 = Triple::new(iri("a"), vocab::RDF_TYPE, Value::Named(Iri::new(vocab::SKOS_CONCEPT)));
        let t2 = Triple::new(iri("b"), vocab::RDF_TYPE, Value::Named(Iri::new(vocab::SKOS_CONCEPT)));
        let g1: Graph = vec![t1.clone(), t2.clone()].into_iter().collect();
        let g2: Graph = vec![t2, t1].into_iter().collect();
        assert_eq!(g1.content_hash(), g2.content_hash());
        assert_eq!(Graph::new().content_hash(), 0);
    }

    #[test]
    fn test_lookup_helpers() {
        let a = iri("a");
        let graph: Graph = vec![Triple::new(
            a.clone(),
            vocab::RDF_TYPE,
            Value::Named(Iri::new(vocab::SKOS_CONCEPT)),
        )]
        .into_iter()
        .collect();
        assert!(graph.has_named(&a, vocab::RDF_TYPE, vocab::SKOS_CONCEPT));
        assert!(!graph.has_named(&a, vocab::RDF_TYPE, vocab::OWL_ONTOLOGY));
        assert_eq!(graph.objects(&a, vocab::RDF_TYPE).count(), 1);
    }
}
