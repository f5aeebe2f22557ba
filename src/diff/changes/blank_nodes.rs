//! Anonymous-subtree change computer implementation.

use crate::diff::isomorphism::IsomorphismMatcher;
use crate::diff::statements::TriplesBySubject;
use crate::diff::subgraph::{reachable_nodes, SubgraphExtractor, SubgraphsByRoot};
use crate::diff::traits::{ChangeComputer, ChangeContext};
use crate::error::Result;
use crate::model::{AnonId, Change, ChangeType, Graph, ObjectValue};
use std::collections::HashSet;

/// Emits changes for anonymous subtrees that have no isomorphic counterpart
/// on the other side.
///
/// Every surviving entry point becomes a root change with a blank-node
/// placeholder object, followed by one child change per triple in its
/// subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankNodeChangeComputer {
    extractor: SubgraphExtractor,
}

impl BlankNodeChangeComputer {
    /// Create a new blank-node change computer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extractor: SubgraphExtractor::new(),
        }
    }

    fn emit(
        change_type: ChangeType,
        entries: &TriplesBySubject,
        subgraphs: &SubgraphsByRoot,
        ctx: &mut ChangeContext<'_>,
        out: &mut Vec<Change>,
    ) {
        for (subject, triples) in entries {
            let label = ctx.labels.label(subject);
            let subject_type = ctx.labels.subject_type(subject);

            for entry in triples {
                let Some(root) = entry.object.as_anon() else {
                    continue;
                };
                let root_change = Change::named(
                    ctx.next_id(),
                    change_type,
                    subject.clone(),
                    entry.predicate.clone(),
                    ObjectValue::BlankNode,
                )
                .with_label(label.clone())
                .with_subject_type(subject_type);
                out.push(root_change);
                Self::walk(out.len() - 1, root, subgraphs, ctx, out);
            }
        }
    }

    /// Emit one child change per triple reachable from `root`.
    ///
    /// The work stack holds `(index of parent change in out, node)` pairs.
    fn walk(
        root_index: usize,
        root: AnonId,
        subgraphs: &SubgraphsByRoot,
        ctx: &ChangeContext<'_>,
        out: &mut Vec<Change>,
    ) {
        let mut visited: HashSet<AnonId> = HashSet::from([root]);
        let mut stack = vec![(root_index, root)];

        while let Some((parent_index, node)) = stack.pop() {
            let Some(triples) = subgraphs.get(&node) else {
                continue;
            };
            for triple in triples {
                let child = Change::child_of(
                    &out[parent_index],
                    ctx.next_id(),
                    triple.predicate.clone(),
                    ObjectValue::from(&triple.object),
                );
                out.push(child);
                if let Some(next) = triple.object.as_anon() {
                    if visited.insert(next) {
                        stack.push((out.len() - 1, next));
                    }
                }
            }
        }
    }
}

impl ChangeComputer for BlankNodeChangeComputer {
    fn compute(
        &self,
        canonical: &Graph,
        draft: &Graph,
        ctx: &mut ChangeContext<'_>,
    ) -> Result<Vec<Change>> {
        let mut canonical_entries = self.extractor.blank_entry_points(canonical);
        let mut canonical_subgraphs = self.extractor.subgraphs_by_root(canonical);
        let mut draft_entries = self.extractor.blank_entry_points(draft);
        let mut draft_subgraphs = self.extractor.subgraphs_by_root(draft);

        let stats = IsomorphismMatcher::new().cancel_isomorphic(
            &mut canonical_entries,
            &mut canonical_subgraphs,
            &mut draft_entries,
            &mut draft_subgraphs,
        );
        tracing::debug!(
            matched = stats.matched_pairs,
            created_roots = draft_entries.values().map(Vec::len).sum::<usize>(),
            removed_roots = canonical_entries.values().map(Vec::len).sum::<usize>(),
            "anonymous subtrees compared"
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            let orphans = orphan_count(&draft_entries, &draft_subgraphs)
                + orphan_count(&canonical_entries, &canonical_subgraphs);
            if orphans > 0 {
                tracing::debug!(orphans, "skipping anonymous nodes unreachable from a named subject");
            }
        }

        let mut changes = Vec::new();
        Self::emit(ChangeType::Created, &draft_entries, &draft_subgraphs, ctx, &mut changes);
        Self::emit(
            ChangeType::Removed,
            &canonical_entries,
            &canonical_subgraphs,
            ctx,
            &mut changes,
        );
        Ok(changes)
    }

    fn name(&self) -> &str {
        "BlankNodeChangeComputer"
    }
}

/// Anonymous subjects left in `subgraphs` that no entry point reaches.
fn orphan_count(entries: &TriplesBySubject, subgraphs: &SubgraphsByRoot) -> usize {
    let mut reachable: HashSet<AnonId> = HashSet::new();
    for root in entries.values().flatten().filter_map(|t| t.object.as_anon()) {
        reachable.extend(reachable_nodes(root, subgraphs));
    }
    subgraphs.keys().filter(|node| !reachable.contains(*node)).count()
}
