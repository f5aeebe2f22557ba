//! Merging a recomputed change list with a previously persisted one.
//!
//! Change identities are random, so a recomputation cannot reproduce them.
//! Reconciliation matches changes structurally instead: two changes are the
//! same when they have the same type, predicate, object and new object, and
//! hang off the same structural path (the named subject for root changes,
//! the matching parent chain for changes inside anonymous subtrees). A
//! matched change keeps its persisted identity and reviewer verdicts.

use crate::model::{Change, ChangeSubject, ChangeType, Iri, ObjectValue};
use std::collections::{HashMap, HashSet, VecDeque};

/// Counts reported by [`reconcile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Persisted changes carried over
    pub kept: usize,
    /// Recomputed changes with no persisted counterpart
    pub added: usize,
    /// Persisted changes no longer reproduced
    pub dropped: usize,
}

/// What a change hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Anchor<'c> {
    Named(&'c Iri),
    /// Key of the parent change
    Parent(u32),
    /// Parent id absent from the list, or part of a parent cycle
    Missing(&'c Iri),
}

/// One step of a structural path.
type Link<'c> = (Anchor<'c>, ChangeType, &'c Iri, &'c ObjectValue, Option<&'c ObjectValue>);

/// Links interned to integers, shared by both lists so their keys compare.
/// A key is one integer however deep the change sits.
#[derive(Default)]
struct KeyInterner<'c> {
    ids: HashMap<Link<'c>, u32>,
}

impl<'c> KeyInterner<'c> {
    fn intern(&mut self, link: Link<'c>) -> u32 {
        let next = u32::try_from(self.ids.len()).unwrap_or(u32::MAX);
        *self.ids.entry(link).or_insert(next)
    }
}

/// Structural keys for a change list, computed through the parent chain.
struct KeyIndex<'c> {
    by_id: HashMap<&'c Iri, &'c Change>,
    cache: HashMap<&'c Iri, u32>,
}

impl<'c> KeyIndex<'c> {
    fn new(changes: &'c [Change]) -> Self {
        Self {
            by_id: changes.iter().map(|c| (&c.id, c)).collect(),
            cache: HashMap::new(),
        }
    }

    fn key(&mut self, change: &'c Change, interner: &mut KeyInterner<'c>) -> u32 {
        if let Some(&cached) = self.cache.get(&change.id) {
            return cached;
        }

        // Climb to a named or already keyed anchor, then intern back down.
        let mut chain: Vec<&'c Change> = vec![change];
        let mut seen: HashSet<&'c Iri> = HashSet::from([&change.id]);
        let mut anchor = loop {
            let Some(&last) = chain.last() else {
                break Anchor::Missing(&change.id);
            };
            let parent_id = match &last.subject {
                ChangeSubject::Named(iri) => break Anchor::Named(iri),
                ChangeSubject::Parent(parent_id) => parent_id,
            };
            let Some(&parent) = self.by_id.get(parent_id) else {
                break Anchor::Missing(parent_id);
            };
            if let Some(&cached) = self.cache.get(&parent.id) {
                break Anchor::Parent(cached);
            }
            if !seen.insert(&parent.id) {
                break Anchor::Missing(parent_id);
            }
            chain.push(parent);
        };

        let mut key = 0;
        for link in chain.into_iter().rev() {
            key = interner.intern((
                anchor,
                link.change_type,
                &link.predicate,
                &link.object,
                link.new_object.as_ref(),
            ));
            self.cache.insert(&link.id, key);
            anchor = Anchor::Parent(key);
        }
        key
    }
}

/// Merge `recomputed` into `previous`.
///
/// The result follows the order of `recomputed`. Each recomputed change is
/// replaced by the first unused persisted change with the same structural
/// key; child changes are re-pointed to the identity of their kept parent.
pub fn reconcile(previous: &[Change], recomputed: Vec<Change>) -> (Vec<Change>, ReconcileStats) {
    let (previous_keys, keys): (Vec<u32>, Vec<u32>) = {
        let mut interner = KeyInterner::default();
        let mut previous_index = KeyIndex::new(previous);
        let mut recomputed_index = KeyIndex::new(&recomputed);
        (
            previous.iter().map(|c| previous_index.key(c, &mut interner)).collect(),
            recomputed.iter().map(|c| recomputed_index.key(c, &mut interner)).collect(),
        )
    };
    let mut available: HashMap<u32, VecDeque<&Change>> = HashMap::new();
    for (change, key) in previous.iter().zip(previous_keys) {
        available.entry(key).or_default().push_back(change);
    }

    let mut stats = ReconcileStats::default();
    let mut renamed: HashMap<Iri, Iri> = HashMap::new();
    let mut out = Vec::with_capacity(recomputed.len());

    for (change, key) in recomputed.into_iter().zip(keys) {
        match available.get_mut(&key).and_then(VecDeque::pop_front) {
            Some(kept) => {
                stats.kept += 1;
                renamed.insert(change.id, kept.id.clone());
                out.push(kept.clone());
            }
            None => {
                stats.added += 1;
                out.push(change);
            }
        }
    }

    for change in &mut out {
        if let ChangeSubject::Parent(parent) = &change.subject {
            if let Some(kept_parent) = renamed.get(parent) {
                change.subject = ChangeSubject::Parent(kept_parent.clone());
            }
        }
    }

    stats.dropped = previous.len() - stats.kept;
    tracing::debug!(
        kept = stats.kept,
        added = stats.added,
        dropped = stats.dropped,
        "reconciled change list"
    );
    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::resolver::ChangeResolver;
    use crate::model::{vocab, ChangeType, Graph, Literal, SequentialIdentifierGenerator, Triple};

    fn graphs() -> (Graph, Graph) {
        let a = Iri::new("http://example.org/A");
        let canonical: Graph = vec![Triple::new(a.clone(), vocab::SKOS_PREF_LABEL, Literal::lang("Dog", "en"))]
            .into_iter()
            .collect();
        let mut draft = canonical.clone();
        let node = draft.fresh_anon();
        draft.insert(Triple::new(a.clone(), "http://e/p", node));
        draft.insert(Triple::new(node, "http://e/q", Literal::plain("x")));
        draft.insert(Triple::new(a, vocab::DCTERMS_TITLE, Literal::plain("Dog")));
        (canonical, draft)
    }

    fn resolve(namespace: &str, canonical: &Graph, draft: &Graph) -> Vec<Change> {
        let ids = SequentialIdentifierGenerator::new(namespace);
        ChangeResolver::new()
            .resolve(canonical, draft, &ids)
            .expect("resolve")
    }

    #[test]
    fn test_recomputation_keeps_ids_and_verdicts() {
        let (canonical, draft) = graphs();
        let mut previous = resolve("urn:old:", &canonical, &draft);
        previous[1].approve("alice");
        previous[2].reject("bob");

        let recomputed = resolve("urn:new:", &canonical, &draft);
        let (merged, stats) = reconcile(&previous, recomputed);

        assert_eq!(merged, previous);
        assert_eq!(stats, ReconcileStats { kept: 3, added: 0, dropped: 0 });
    }

    #[test]
    fn test_new_child_is_repointed_to_kept_parent() {
        let (canonical, draft) = graphs();
        let previous = resolve("urn:old:", &canonical, &draft);
        let root = previous
            .iter()
            .find(|c| c.points_at_blank_node())
            .expect("blank root")
            .clone();
        // Drop the persisted child so the recomputed one is new.
        let previous: Vec<Change> = previous.into_iter().filter(|c| !c.is_in_blank_node()).collect();

        let (merged, stats) = reconcile(&previous, resolve("urn:new:", &canonical, &draft));
        assert_eq!(stats.added, 1);
        let child = merged.iter().find(|c| c.is_in_blank_node()).expect("child");
        assert_eq!(child.subject, ChangeSubject::Parent(root.id));
        assert!(child.id.as_str().starts_with("urn:new:"));
    }

    #[test]
    fn test_vanished_change_is_dropped() {
        let (canonical, draft) = graphs();
        let previous = resolve("urn:old:", &canonical, &draft);
        let (merged, stats) = reconcile(&previous, resolve("urn:new:", &canonical, &canonical));
        assert!(merged.is_empty());
        assert_eq!(stats.dropped, previous.len());
    }

    #[test]
    fn test_deep_subtree_keeps_every_change() {
        let canonical = Graph::new();
        let mut draft = Graph::new();
        let mut cell = draft.fresh_anon();
        draft.insert(Triple::new(Iri::new("http://example.org/A"), "http://e/items", cell));
        for i in 0..5_000 {
            draft.insert(Triple::new(cell, "http://e/first", Literal::plain(i.to_string())));
            let next = draft.fresh_anon();
            draft.insert(Triple::new(cell, "http://e/rest", next));
            cell = next;
        }
        let previous = resolve("urn:old:", &canonical, &draft);
        assert_eq!(previous.len(), 10_001);

        // Children ahead of their parents, so keys are built by climbing the chain.
        let reversed: Vec<Change> = previous.iter().rev().cloned().collect();
        let (merged, stats) = reconcile(&reversed, resolve("urn:new:", &canonical, &draft));
        assert_eq!(stats, ReconcileStats { kept: previous.len(), added: 0, dropped: 0 });
        assert_eq!(merged, previous);
    }

    #[test]
    fn test_changed_type_is_not_matched() {
        let (canonical, draft) = graphs();
        let previous = resolve("urn:old:", &canonical, &draft);
        let (merged, stats) = reconcile(&previous, resolve("urn:new:", &draft, &canonical));
        assert_eq!(stats.kept, 0);
        assert!(merged.iter().all(|c| c.change_type == ChangeType::Removed));
    }
}
