//! Cancellation of structurally identical anonymous subtrees.
//!
//! Two subtrees are isomorphic when they hold the same triples once the
//! anonymous node keys are erased. Each subtree gets a canonical signature:
//! the sorted `(predicate, object)` entries of its root, where an anonymous
//! object is replaced by the signature of its own subtree, or by the distance
//! up the current walk when it closes a cycle. Entry lists are interned, so a
//! signature is a single integer and a chain of any depth costs one entry per
//! link.
//!
//! Signatures of nodes outside any cycle do not depend on how the walk
//! reached them and are cached per graph. Nodes on a cycle are re-expanded
//! from every entry into the cycle, under an expansion budget; a subtree that
//! exhausts it gets a unique signature and is reported as changed rather
//! than matched.

use super::statements::TriplesBySubject;
use super::subgraph::{cyclic_nodes, reachable_nodes, SubgraphsByRoot};
use crate::model::{AnonId, Iri, Triple, Value};
use std::collections::{HashMap, HashSet};

/// Expansions allowed per anonymous triple in one signature walk.
const EXPANSIONS_PER_TRIPLE: usize = 64;
/// Expansions allowed in one signature walk regardless of graph size.
const MIN_EXPANSIONS: usize = 1024;

/// Object position of a signature entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Shape {
    /// Named or literal object, compared by value
    Term(Value),
    /// Anonymous object, by the interned signature of its subtree
    Node(u32),
    /// Anonymous object on the current walk, this many steps up
    Back(u32),
}

type Entry = (Iri, Shape);

/// Interned entry lists shared by both graphs, so equal ids mean equal
/// structure across them.
#[derive(Debug, Default)]
struct Interner {
    ids: HashMap<Vec<Entry>, u32>,
    next: u32,
}

impl Interner {
    fn intern(&mut self, mut entries: Vec<Entry>) -> u32 {
        entries.sort_unstable();
        if let Some(&id) = self.ids.get(&entries) {
            return id;
        }
        let id = self.fresh();
        self.ids.insert(entries, id);
        id
    }

    /// An id no entry list will ever intern to.
    fn fresh(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// What two entry-point subtrees must share to be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    signature: u32,
    nodes: usize,
    triples: usize,
}

/// One node being signed.
struct Frame<'g> {
    node: AnonId,
    depth: usize,
    /// Predicate of the edge the walk arrived through; `None` for the root
    via: Option<&'g Iri>,
    triples: &'g [Triple],
    cursor: usize,
    entries: Vec<Entry>,
}

impl<'g> Frame<'g> {
    fn new(node: AnonId, depth: usize, via: Option<&'g Iri>, subgraphs: &'g SubgraphsByRoot) -> Self {
        Self {
            node,
            depth,
            via,
            triples: subgraphs.get(&node).map(Vec::as_slice).unwrap_or_default(),
            cursor: 0,
            entries: Vec::new(),
        }
    }
}

/// Per-graph facts every walk needs.
#[derive(Debug)]
struct GraphShape {
    /// Nodes on a cycle of two or more nodes
    cyclic: HashSet<AnonId>,
    /// Frames one walk may push
    budget: usize,
}

impl GraphShape {
    fn of(subgraphs: &SubgraphsByRoot) -> Self {
        let triples: usize = subgraphs.values().map(Vec::len).sum();
        Self {
            cyclic: cyclic_nodes(subgraphs),
            budget: triples
                .saturating_mul(EXPANSIONS_PER_TRIPLE)
                .saturating_add(MIN_EXPANSIONS),
        }
    }
}

/// Signature cache for one graph. Request-scoped.
#[derive(Debug, Default)]
struct SignatureCache {
    /// Signatures of nodes outside any cycle
    signatures: HashMap<AnonId, u32>,
    /// Computed on first use
    shape: Option<GraphShape>,
}

impl SignatureCache {
    /// Canonical signature of the subtree rooted at `root`.
    ///
    /// Depth-first walk on an explicit stack; deep chains do not grow the
    /// native call stack.
    fn signature(&mut self, root: AnonId, subgraphs: &SubgraphsByRoot, interner: &mut Interner) -> u32 {
        if let Some(&id) = self.signatures.get(&root) {
            return id;
        }
        let Self { signatures, shape } = self;
        let graph = shape.get_or_insert_with(|| GraphShape::of(subgraphs));
        let mut budget = graph.budget;
        let mut path: HashMap<AnonId, usize> = HashMap::from([(root, 0)]);
        let mut stack = vec![Frame::new(root, 0, None, subgraphs)];

        while let Some(frame) = stack.last_mut() {
            let triples = frame.triples;
            let Some(triple) = triples.get(frame.cursor) else {
                let Some(done) = stack.pop() else {
                    break;
                };
                path.remove(&done.node);
                let id = interner.intern(done.entries);
                if !graph.cyclic.contains(&done.node) {
                    signatures.insert(done.node, id);
                }
                match (stack.last_mut(), done.via) {
                    (Some(parent), Some(predicate)) => {
                        parent.entries.push((predicate.clone(), Shape::Node(id)));
                    }
                    _ => return id,
                }
                continue;
            };
            frame.cursor += 1;

            let object = match triple.object.as_anon() {
                None => Shape::Term(triple.object.clone()),
                Some(child) => match (path.get(&child), signatures.get(&child)) {
                    (Some(&ancestor), _) => {
                        Shape::Back(u32::try_from(frame.depth - ancestor).unwrap_or(u32::MAX))
                    }
                    (None, Some(&id)) => Shape::Node(id),
                    (None, None) => {
                        if budget == 0 {
                            tracing::debug!(root = %root, "signature expansion budget exhausted");
                            return interner.fresh();
                        }
                        budget -= 1;
                        let depth = frame.depth + 1;
                        path.insert(child, depth);
                        stack.push(Frame::new(child, depth, Some(&triple.predicate), subgraphs));
                        continue;
                    }
                },
            };
            frame.entries.push((triple.predicate.clone(), object));
        }

        interner.fresh()
    }

    /// Signature plus the size of everything reachable from `root`.
    ///
    /// The counts tell a node shared by two branches from two copies of it,
    /// which unfold to the same signature.
    fn fingerprint(&mut self, root: AnonId, subgraphs: &SubgraphsByRoot, interner: &mut Interner) -> Fingerprint {
        let signature = self.signature(root, subgraphs, interner);
        let nodes = reachable_nodes(root, subgraphs);
        let triples = nodes.iter().filter_map(|n| subgraphs.get(n)).map(Vec::len).sum();
        Fingerprint {
            signature,
            nodes: nodes.len(),
            triples,
        }
    }
}

/// Outcome of [`IsomorphismMatcher::cancel_isomorphic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Entry-point pairs cancelled as unchanged
    pub matched_pairs: usize,
    /// Anonymous nodes removed from the canonical subgraphs
    pub canonical_nodes_removed: usize,
    /// Anonymous nodes removed from the draft subgraphs
    pub draft_nodes_removed: usize,
}

/// Pairs up isomorphic anonymous subtrees between two graphs.
///
/// Pairing is greedy: for each subject, the first canonical entry point is
/// matched with the first draft entry point of the same predicate whose
/// subtree is isomorphic, and the search restarts until nothing matches.
#[derive(Debug, Default)]
pub struct IsomorphismMatcher {
    interner: Interner,
    canonical_cache: SignatureCache,
    draft_cache: SignatureCache,
}

impl IsomorphismMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the subtree at `canonical` is isomorphic to the one at `draft`.
    pub fn is_isomorphic(
        &mut self,
        canonical: AnonId,
        canonical_subgraphs: &SubgraphsByRoot,
        draft: AnonId,
        draft_subgraphs: &SubgraphsByRoot,
    ) -> bool {
        let canonical = self
            .canonical_cache
            .fingerprint(canonical, canonical_subgraphs, &mut self.interner);
        let draft = self.draft_cache.fingerprint(draft, draft_subgraphs, &mut self.interner);
        canonical == draft
    }

    /// Remove matched entry points and their subtrees from all four maps.
    ///
    /// Every candidate subtree is fingerprinted before anything is removed,
    /// so the outcome does not depend on which pair is cancelled first.
    /// Subjects whose entry-point list becomes empty are dropped.
    pub fn cancel_isomorphic(
        &mut self,
        canonical_entries: &mut TriplesBySubject,
        canonical_subgraphs: &mut SubgraphsByRoot,
        draft_entries: &mut TriplesBySubject,
        draft_subgraphs: &mut SubgraphsByRoot,
    ) -> MatchStats {
        let mut stats = MatchStats::default();
        let subjects: Vec<_> = canonical_entries
            .keys()
            .filter(|s| draft_entries.contains_key(*s))
            .cloned()
            .collect();

        let canonical_prints = fingerprints(
            &mut self.canonical_cache,
            entry_roots(&subjects, canonical_entries),
            canonical_subgraphs,
            &mut self.interner,
        );
        let draft_prints = fingerprints(
            &mut self.draft_cache,
            entry_roots(&subjects, draft_entries),
            draft_subgraphs,
            &mut self.interner,
        );

        for subject in subjects {
            loop {
                let (Some(canon_list), Some(draft_list)) =
                    (canonical_entries.get(&subject), draft_entries.get(&subject))
                else {
                    break;
                };
                let Some((ci, di)) = first_match(canon_list, &canonical_prints, draft_list, &draft_prints)
                else {
                    break;
                };

                let canon_triple = canonical_entries.get_mut(&subject).map(|l| l.remove(ci));
                let draft_triple = draft_entries.get_mut(&subject).map(|l| l.remove(di));
                let (Some(canon_triple), Some(draft_triple)) = (canon_triple, draft_triple) else {
                    break;
                };
                stats.matched_pairs += 1;
                stats.canonical_nodes_removed += remove_subtree(&canon_triple, canonical_subgraphs);
                stats.draft_nodes_removed += remove_subtree(&draft_triple, draft_subgraphs);
                tracing::debug!(
                    subject = %subject,
                    predicate = %canon_triple.predicate,
                    "cancelled isomorphic anonymous subtree"
                );
            }
        }

        canonical_entries.retain(|_, triples| !triples.is_empty());
        draft_entries.retain(|_, triples| !triples.is_empty());
        stats
    }
}

fn entry_roots<'a>(subjects: &'a [Iri], entries: &'a TriplesBySubject) -> impl Iterator<Item = AnonId> + 'a {
    subjects
        .iter()
        .filter_map(|s| entries.get(s))
        .flatten()
        .filter_map(|t| t.object.as_anon())
}

fn fingerprints(
    cache: &mut SignatureCache,
    roots: impl Iterator<Item = AnonId>,
    subgraphs: &SubgraphsByRoot,
    interner: &mut Interner,
) -> HashMap<AnonId, Fingerprint> {
    roots
        .map(|root| (root, cache.fingerprint(root, subgraphs, interner)))
        .collect()
}

fn first_match(
    canon_list: &[Triple],
    canonical_prints: &HashMap<AnonId, Fingerprint>,
    draft_list: &[Triple],
    draft_prints: &HashMap<AnonId, Fingerprint>,
) -> Option<(usize, usize)> {
    canon_list.iter().enumerate().find_map(|(ci, canon)| {
        let print = canon.object.as_anon().and_then(|root| canonical_prints.get(&root))?;
        draft_list
            .iter()
            .position(|draft| {
                draft.predicate == canon.predicate
                    && draft.object.as_anon().and_then(|root| draft_prints.get(&root)) == Some(print)
            })
            .map(|di| (ci, di))
    })
}

fn remove_subtree(entry: &Triple, subgraphs: &mut SubgraphsByRoot) -> usize {
    let Some(root) = entry.object.as_anon() else {
        return 0;
    };
    let nodes = reachable_nodes(root, subgraphs);
    let mut removed = 0;
    for node in nodes {
        if subgraphs.shift_remove(&node).is_some() {
            removed += 1;
        }
    }
    removed
}
