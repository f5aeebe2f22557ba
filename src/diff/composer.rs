//! Folding of OWL restriction subtrees into composite changes.
//!
//! A restriction is recorded in the flat change list as a root change (named
//! subject, blank-node object) followed by the child changes of the
//! restriction node: `rdf:type owl:Restriction`, `owl:onProperty`, the
//! cardinalities and `owl:onClass`. The composer groups these per named
//! subject into one [`RestrictionChange`] that reports the cardinality and
//! class on the start and the end side of a relation.

use super::labels::LabelResolver;
use crate::model::{
    aggregate_review_state, vocab, Change, ChangeType, Iri, MultilingualString, ObjectValue,
    ReviewState,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Old and new value of a composite attribute.
///
/// `old` is taken from removed constituents and `new` from created ones;
/// within each the first value found wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueChange<T> {
    pub old: Option<T>,
    pub new: Option<T>,
}

impl<T> Default for ValueChange<T> {
    fn default() -> Self {
        Self {
            old: None,
            new: None,
        }
    }
}

impl<T: PartialEq> ValueChange<T> {
    /// Whether the value differs between the two versions.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.old != self.new
    }

    fn record(&mut self, removed: bool, value: Option<T>) {
        let slot = if removed { &mut self.old } else { &mut self.new };
        if slot.is_none() {
            *slot = value;
        }
    }
}

/// Minimum and maximum cardinality of one side of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cardinality {
    pub min: ValueChange<u64>,
    pub max: ValueChange<u64>,
}

/// A class referenced through `owl:onClass`, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRef {
    pub iri: Iri,
    #[serde(skip_serializing_if = "MultilingualString::is_empty")]
    pub label: MultilingualString,
}

/// Restriction data collected for one side of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestrictionSide {
    pub cardinality: Cardinality,
    pub class: ValueChange<ClassRef>,
}

impl RestrictionSide {
    /// Whether any attribute of this side differs between the versions.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.cardinality.min.is_changed()
            || self.cardinality.max.is_changed()
            || self.class.is_changed()
    }
}

/// Composite change for the restrictions of one named subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestrictionChange {
    /// Named subject carrying the restrictions
    pub relation: Iri,
    #[serde(skip_serializing_if = "MultilingualString::is_empty")]
    pub label: MultilingualString,
    /// Side restricted through `má-vztažený-prvek-1`
    pub start: RestrictionSide,
    /// Side restricted through any other property
    pub end: RestrictionSide,
    pub change_type: ChangeType,
    pub review_state: ReviewState,
    /// Constituent flat changes, in flat-list order
    pub affected_changes: Vec<Change>,
}

impl RestrictionChange {
    /// Review state as seen by one reviewer, or by all when `None`.
    #[must_use]
    pub fn review_state_for(&self, reviewer: Option<&str>) -> ReviewState {
        aggregate_review_state(&self.affected_changes, reviewer)
    }
}

/// An entry of the composed change list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComposedChange {
    Atomic(Change),
    Restriction(RestrictionChange),
}

impl ComposedChange {
    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        match self {
            Self::Atomic(change) => change.change_type,
            Self::Restriction(restriction) => restriction.change_type,
        }
    }

    #[must_use]
    pub fn review_state(&self, reviewer: Option<&str>) -> ReviewState {
        match self {
            Self::Atomic(change) => change.review_state(reviewer),
            Self::Restriction(restriction) => restriction.review_state_for(reviewer),
        }
    }

    /// Flat changes this entry stands for.
    #[must_use]
    pub fn constituents(&self) -> &[Change] {
        match self {
            Self::Atomic(change) => std::slice::from_ref(change),
            Self::Restriction(restriction) => &restriction.affected_changes,
        }
    }

    #[must_use]
    pub const fn as_restriction(&self) -> Option<&RestrictionChange> {
        match self {
            Self::Restriction(restriction) => Some(restriction),
            Self::Atomic(_) => None,
        }
    }
}

/// A blank-node change whose children describe an `owl:Restriction`.
#[derive(Debug, Clone)]
struct RestrictionNode {
    removed: bool,
    on_property: Iri,
    min: Option<u64>,
    max: Option<u64>,
    on_class: Option<Iri>,
}

/// A root change together with its subtree, when the subtree holds at least
/// one restriction node.
#[derive(Debug, Clone)]
struct RestrictionRoot {
    root: usize,
    members: Vec<usize>,
    nodes: Vec<RestrictionNode>,
}

impl RestrictionRoot {
    fn names_related_element(&self) -> bool {
        self.nodes.iter().any(|n| {
            n.on_property == vocab::MA_VZTAZENY_PRVEK_1 || n.on_property == vocab::MA_VZTAZENY_PRVEK_2
        })
    }
}

/// Index over the flat list: root changes by named subject and child
/// changes by parent change id.
struct Partition<'c> {
    changes: &'c [Change],
    pointing_at_blank: IndexMap<Iri, Vec<usize>>,
    in_blank: HashMap<&'c Iri, Vec<usize>>,
}

impl<'c> Partition<'c> {
    fn new(changes: &'c [Change]) -> Self {
        let mut pointing_at_blank: IndexMap<Iri, Vec<usize>> = IndexMap::new();
        let mut in_blank: HashMap<&'c Iri, Vec<usize>> = HashMap::new();
        for (idx, change) in changes.iter().enumerate() {
            if let Some(parent) = change.subject.as_parent() {
                in_blank.entry(parent).or_default().push(idx);
            } else if change.points_at_blank_node() {
                if let Some(subject) = change.subject_iri() {
                    pointing_at_blank.entry(subject.clone()).or_default().push(idx);
                }
            }
        }
        Self {
            changes,
            pointing_at_blank,
            in_blank,
        }
    }

    fn children(&self, idx: usize) -> &[usize] {
        self.in_blank
            .get(&self.changes[idx].id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `root` and every change below it, in flat-list order.
    fn subtree(&self, root: usize) -> Vec<usize> {
        let mut seen: HashSet<usize> = HashSet::from([root]);
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            for &child in self.children(idx) {
                if seen.insert(child) {
                    stack.push(child);
                }
            }
        }
        let mut members: Vec<usize> = seen.into_iter().collect();
        members.sort_unstable();
        members
    }

    fn restriction_node(&self, idx: usize) -> Option<RestrictionNode> {
        let change = &self.changes[idx];
        if !change.object.is_blank_node() {
            return None;
        }
        let children: Vec<&Change> = self.children(idx).iter().map(|&i| &self.changes[i]).collect();

        let is_restriction = children.iter().any(|c| {
            c.predicate == vocab::RDF_TYPE
                && c.object.as_iri().is_some_and(|o| *o == vocab::OWL_RESTRICTION)
        });
        let on_property = children
            .iter()
            .filter(|c| c.predicate == vocab::OWL_ON_PROPERTY)
            .find_map(|c| c.object.as_iri())?;
        if !is_restriction {
            return None;
        }

        Some(RestrictionNode {
            removed: change.change_type == ChangeType::Removed,
            on_property: on_property.clone(),
            min: children
                .iter()
                .filter(|c| vocab::is_min_cardinality(c.predicate.as_str()))
                .find_map(|c| parse_cardinality(&c.object)),
            max: children
                .iter()
                .filter(|c| vocab::is_max_cardinality(c.predicate.as_str()))
                .find_map(|c| parse_cardinality(&c.object)),
            on_class: children
                .iter()
                .filter(|c| c.predicate == vocab::OWL_ON_CLASS)
                .find_map(|c| c.object.as_iri())
                .cloned(),
        })
    }

    fn restriction_roots(&self, subject: &Iri) -> Vec<RestrictionRoot> {
        let Some(roots) = self.pointing_at_blank.get(subject) else {
            return Vec::new();
        };
        roots
            .iter()
            .filter_map(|&root| {
                let members = self.subtree(root);
                let nodes: Vec<RestrictionNode> = members
                    .iter()
                    .filter_map(|&idx| self.restriction_node(idx))
                    .collect();
                (!nodes.is_empty()).then_some(RestrictionRoot {
                    root,
                    members,
                    nodes,
                })
            })
            .collect()
    }
}

fn parse_cardinality(object: &ObjectValue) -> Option<u64> {
    let literal = object.as_literal()?;
    match literal.text.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(value = %literal, "ignoring unparsable cardinality");
            None
        }
    }
}

/// Composite under construction; holds flat-list indices only.
struct Plan {
    relation: Iri,
    label: MultilingualString,
    start: RestrictionSide,
    end: RestrictionSide,
    members: Vec<usize>,
}

impl Plan {
    fn new(relation: Iri, label: MultilingualString) -> Self {
        Self {
            relation,
            label,
            start: RestrictionSide::default(),
            end: RestrictionSide::default(),
            members: Vec::new(),
        }
    }

    fn record(&mut self, node: &RestrictionNode, labels: &mut LabelResolver<'_>) {
        let side = if node.on_property == vocab::MA_VZTAZENY_PRVEK_1 {
            &mut self.start
        } else {
            &mut self.end
        };
        side.cardinality.min.record(node.removed, node.min);
        side.cardinality.max.record(node.removed, node.max);
        let class = node.on_class.as_ref().map(|iri| ClassRef {
            iri: iri.clone(),
            label: labels.label(iri),
        });
        side.class.record(node.removed, class);
    }
}

/// Groups restriction subtrees of the flat change list into composites.
#[derive(Debug, Clone, Default)]
pub struct ChangeComposer {
    reviewer: Option<String>,
}

impl ChangeComposer {
    #[must_use]
    pub const fn new() -> Self {
        Self { reviewer: None }
    }

    /// Compute composite review states as seen by one reviewer.
    #[must_use]
    pub fn with_reviewer(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewer = Some(reviewer.into());
        self
    }

    /// Fold `changes` into the composed list.
    ///
    /// Each composite takes the position of its first constituent; the
    /// constituents themselves are no longer listed on their own.
    pub fn compose(&self, changes: Vec<Change>, labels: &mut LabelResolver<'_>) -> Vec<ComposedChange> {
        let plans = Self::plan(&changes, labels);
        if plans.is_empty() {
            return changes.into_iter().map(ComposedChange::Atomic).collect();
        }

        let mut slots: Vec<Option<Change>> = changes.into_iter().map(Some).collect();
        let mut by_first: HashMap<usize, RestrictionChange> = HashMap::new();
        for plan in plans {
            let Some(&first) = plan.members.first() else {
                continue;
            };
            let affected: Vec<Change> = plan
                .members
                .iter()
                .filter_map(|&idx| slots[idx].take())
                .collect();
            let restriction = RestrictionChange {
                change_type: derive_change_type(&affected),
                review_state: aggregate_review_state(&affected, self.reviewer.as_deref()),
                relation: plan.relation,
                label: plan.label,
                start: plan.start,
                end: plan.end,
                affected_changes: affected,
            };
            tracing::debug!(
                relation = %restriction.relation,
                constituents = restriction.affected_changes.len(),
                "composed restriction change"
            );
            by_first.insert(first, restriction);
        }

        let mut out = Vec::with_capacity(slots.len());
        for (idx, slot) in slots.into_iter().enumerate() {
            if let Some(restriction) = by_first.remove(&idx) {
                out.push(ComposedChange::Restriction(restriction));
            } else if let Some(change) = slot {
                out.push(ComposedChange::Atomic(change));
            }
        }
        out
    }

    fn plan(changes: &[Change], labels: &mut LabelResolver<'_>) -> Vec<Plan> {
        let partition = Partition::new(changes);

        let mut candidates: Vec<(Iri, Vec<RestrictionRoot>)> = partition
            .pointing_at_blank
            .keys()
            .map(|subject| (subject.clone(), partition.restriction_roots(subject)))
            .filter(|(_, roots)| !roots.is_empty())
            .collect();
        // Relations (restricted through má-vztažený-prvek-1/2) go first so
        // they can claim the restrictions of their classes.
        candidates.sort_by_key(|(_, roots)| !roots.iter().any(RestrictionRoot::names_related_element));

        let mut consumed: HashSet<usize> = HashSet::new();
        let mut plans = Vec::new();

        for (subject, roots) in candidates {
            let roots: Vec<RestrictionRoot> = roots
                .into_iter()
                .filter(|r| !consumed.contains(&r.root))
                .collect();
            let Some(first_root) = roots.first() else {
                continue;
            };

            let mut plan = Plan::new(subject.clone(), changes[first_root.root].label.clone());
            let mut pending: Vec<Iri> = Vec::new();
            for root in &roots {
                for node in &root.nodes {
                    plan.record(node, labels);
                    pending.extend(node.on_class.iter().cloned());
                }
                consumed.extend(root.members.iter().copied());
                plan.members.extend(root.members.iter().copied());
            }

            let mut visited: HashSet<Iri> = HashSet::new();
            while let Some(class) = pending.pop() {
                if !visited.insert(class.clone()) {
                    continue;
                }
                for root in partition.restriction_roots(&class) {
                    if consumed.contains(&root.root)
                        || !root.nodes.iter().any(|n| n.on_property == subject)
                    {
                        continue;
                    }
                    pending.extend(root.nodes.iter().filter_map(|n| n.on_class.clone()));
                    consumed.extend(root.members.iter().copied());
                    plan.members.extend(root.members);
                }
            }

            plan.members.sort_unstable();
            plan.members.dedup();
            plans.push(plan);
        }
        plans
    }
}

fn derive_change_type(changes: &[Change]) -> ChangeType {
    let all = |t: ChangeType| changes.iter().all(|c| c.change_type == t);
    if all(ChangeType::Created) {
        ChangeType::Created
    } else if all(ChangeType::Removed) {
        ChangeType::Removed
    } else {
        ChangeType::Modified
    }
}
