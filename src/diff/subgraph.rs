//! Partitioning of a graph into anonymous subtrees and their entry points.

use super::statements::TriplesBySubject;
use crate::model::{AnonId, Graph, Triple};
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// Triples whose subject is anonymous, keyed by that subject.
///
/// Keys are the graph-local [`AnonId`]s, so this doubles as the arena the
/// subtree walks index into.
pub type SubgraphsByRoot = IndexMap<AnonId, Vec<Triple>>;

/// Extracts anonymous subtrees and their entry points from a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubgraphExtractor;

impl SubgraphExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All triples with an anonymous subject, grouped by subject.
    #[must_use]
    pub fn subgraphs_by_root(&self, graph: &Graph) -> SubgraphsByRoot {
        let mut out = SubgraphsByRoot::new();
        for triple in graph {
            if let Some(id) = triple.subject.as_anon() {
                out.entry(id).or_default().push(triple.clone());
            }
        }
        out
    }

    /// All triples with a named subject and an anonymous object, grouped by
    /// subject.
    #[must_use]
    pub fn blank_entry_points(&self, graph: &Graph) -> TriplesBySubject {
        let mut out = TriplesBySubject::new();
        for triple in graph.iter().filter(|t| t.is_blank_entry_point()) {
            if let Some(subject) = triple.subject.as_named() {
                out.entry(subject.clone()).or_default().push(triple.clone());
            }
        }
        out
    }
}

/// Every anonymous node reachable from `root`, including `root`, in
/// discovery order. Cycles are visited once.
#[must_use]
pub fn reachable_nodes(root: AnonId, subgraphs: &SubgraphsByRoot) -> Vec<AnonId> {
    let mut seen = IndexSet::from([root]);
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let Some(triples) = subgraphs.get(&node) else {
            continue;
        };
        for child in triples.iter().filter_map(|t| t.object.as_anon()) {
            if seen.insert(child) {
                stack.push(child);
            }
        }
    }
    seen.into_iter().collect()
}

/// Anonymous nodes lying on a cycle of two or more nodes.
///
/// Tarjan's strongly connected components on an explicit stack. A node whose
/// only cycle is an edge to itself is not included.
#[must_use]
pub fn cyclic_nodes(subgraphs: &SubgraphsByRoot) -> HashSet<AnonId> {
    // Discovery index and low-link per visited node.
    let mut links: HashMap<AnonId, (usize, usize)> = HashMap::new();
    let mut component: Vec<AnonId> = Vec::new();
    let mut on_component: HashSet<AnonId> = HashSet::new();
    let mut cyclic = HashSet::new();

    for &start in subgraphs.keys() {
        if links.contains_key(&start) {
            continue;
        }
        let mut work: Vec<(AnonId, usize)> = vec![(start, 0)];
        links.insert(start, (links.len(), links.len()));
        component.push(start);
        on_component.insert(start);

        while let Some((node, cursor)) = work.pop() {
            let triples = subgraphs.get(&node).map(Vec::as_slice).unwrap_or_default();
            if let Some(triple) = triples.get(cursor) {
                work.push((node, cursor + 1));
                let Some(child) = triple.object.as_anon() else {
                    continue;
                };
                match links.get(&child) {
                    None => {
                        links.insert(child, (links.len(), links.len()));
                        component.push(child);
                        on_component.insert(child);
                        work.push((child, 0));
                    }
                    Some(&(child_index, _)) if on_component.contains(&child) => {
                        lower_link(&mut links, node, child_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            let Some(&(index, low)) = links.get(&node) else {
                continue;
            };
            if let Some(&(parent, _)) = work.last() {
                lower_link(&mut links, parent, low);
            }
            if index == low {
                let mut members = Vec::new();
                while let Some(member) = component.pop() {
                    on_component.remove(&member);
                    members.push(member);
                    if member == node {
                        break;
                    }
                }
                if members.len() > 1 {
                    cyclic.extend(members);
                }
            }
        }
    }
    cyclic
}

fn lower_link(links: &mut HashMap<AnonId, (usize, usize)>, node: AnonId, candidate: usize) {
    if let Some((_, low)) = links.get_mut(&node) {
        *low = (*low).min(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{vocab, Iri, Literal, Value};

    fn restriction_graph() -> (Graph, AnonId, AnonId) {
        let mut graph = Graph::new();
        let outer = graph.fresh_anon();
        let inner = graph.fresh_anon();
        let class = Iri::new("http://example.org/C");
        graph.insert(Triple::new(class, "http://www.w3.org/2000/01/rdf-schema#subClassOf", Value::Anonymous(outer)));
        graph.insert(Triple::new(outer, vocab::RDF_TYPE, Iri::new(vocab::OWL_RESTRICTION)));
        graph.insert(Triple::new(outer, "http://example.org/nested", Value::Anonymous(inner)));
        graph.insert(Triple::new(inner, "http://example.org/value", Literal::plain("1")));
        (graph, outer, inner)
    }

    #[test]
    fn test_subgraphs_grouped_by_anonymous_subject() {
        let (graph, outer, inner) = restriction_graph();
        let subgraphs = SubgraphExtractor::new().subgraphs_by_root(&graph);
        assert_eq!(subgraphs.len(), 2);
        assert_eq!(subgraphs[&outer].len(), 2);
        assert_eq!(subgraphs[&inner].len(), 1);
    }

    #[test]
    fn test_entry_points_only_named_subjects() {
        let (graph, _, _) = restriction_graph();
        let entries = SubgraphExtractor::new().blank_entry_points(&graph);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[&Iri::new("http://example.org/C")].len(), 1);
    }

    #[test]
    fn test_reachable_nodes_handles_cycles() {
        let (mut graph, outer, inner) = restriction_graph();
        graph.insert(Triple::new(inner, "http://example.org/back", Value::Anonymous(outer)));
        let subgraphs = SubgraphExtractor::new().subgraphs_by_root(&graph);
        assert_eq!(reachable_nodes(outer, &subgraphs), vec![outer, inner]);
    }

    #[test]
    fn test_cyclic_nodes_excludes_self_loops_and_tails() {
        let (mut graph, outer, inner) = restriction_graph();
        let tail = graph.fresh_anon();
        let looped = graph.fresh_anon();
        graph.insert(Triple::new(inner, "http://example.org/back", Value::Anonymous(outer)));
        graph.insert(Triple::new(inner, "http://example.org/tail", Value::Anonymous(tail)));
        graph.insert(Triple::new(tail, "http://example.org/next", Value::Anonymous(looped)));
        graph.insert(Triple::new(looped, "http://example.org/next", Value::Anonymous(looped)));

        let subgraphs = SubgraphExtractor::new().subgraphs_by_root(&graph);
        assert_eq!(cyclic_nodes(&subgraphs), HashSet::from([outer, inner]));
    }

    #[test]
    fn test_cyclic_nodes_on_a_deep_ring() {
        let mut graph = Graph::new();
        let nodes: Vec<AnonId> = (0..20_000).map(|_| graph.fresh_anon()).collect();
        for (i, &node) in nodes.iter().enumerate() {
            let next = nodes[(i + 1) % nodes.len()];
            graph.insert(Triple::new(node, "http://example.org/next", Value::Anonymous(next)));
        }
        let subgraphs = SubgraphExtractor::new().subgraphs_by_root(&graph);
        assert_eq!(cyclic_nodes(&subgraphs).len(), nodes.len());
    }
}
