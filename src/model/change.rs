//! Reviewable change records.

use super::{Iri, Literal, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of a change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    Created,
    Modified,
    Removed,
    /// Set by reviewers when a change was reverted in the draft; never
    /// produced by recomputation.
    Rollbacked,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Modified => write!(f, "Modified"),
            Self::Removed => write!(f, "Removed"),
            Self::Rollbacked => write!(f, "Rollbacked"),
        }
    }
}

/// What kind of resource a change is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectType {
    Term,
    Vocabulary,
    BlankNode,
    Unknown,
}

/// Subject of a change: a named resource, or the parent change whose
/// anonymous object this change hangs off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSubject {
    Named(Iri),
    Parent(Iri),
}

impl ChangeSubject {
    #[must_use]
    pub const fn as_named(&self) -> Option<&Iri> {
        match self {
            Self::Named(iri) => Some(iri),
            Self::Parent(_) => None,
        }
    }

    #[must_use]
    pub const fn as_parent(&self) -> Option<&Iri> {
        match self {
            Self::Parent(id) => Some(id),
            Self::Named(_) => None,
        }
    }
}

/// Object of a change. Anonymous objects are replaced by a placeholder and
/// expanded into child changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectValue {
    Iri(Iri),
    Literal(Literal),
    BlankNode,
}

impl ObjectValue {
    #[must_use]
    pub const fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode)
    }

    #[must_use]
    pub const fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<&Value> for ObjectValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Named(iri) => Self::Iri(iri.clone()),
            Value::Literal(lit) => Self::Literal(lit.clone()),
            Value::Anonymous(_) => Self::BlankNode,
        }
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => iri.fmt(f),
            Self::Literal(lit) => lit.fmt(f),
            Self::BlankNode => write!(f, "[]"),
        }
    }
}

/// Display label keyed by language tag (`""` for untagged values).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultilingualString {
    translations: BTreeMap<String, String>,
}

impl MultilingualString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a language unless one is already present.
    pub fn insert_if_absent(&mut self, language: Option<&str>, text: impl Into<String>) {
        self.translations
            .entry(language.unwrap_or_default().to_string())
            .or_insert_with(|| text.into());
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }

    /// Value in `language`, else the untagged value, else any value.
    #[must_use]
    pub fn preferred(&self, language: &str) -> Option<&str> {
        self.get(language)
            .or_else(|| self.get(""))
            .or_else(|| self.translations.values().next().map(String::as_str))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.translations.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Review state of a change or a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewState {
    Approved,
    Rejected,
    NotReviewed,
}

/// Reviewer verdicts carried by a single change, as seen by one reviewer or
/// by all reviewers together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub approved: bool,
    pub rejected: bool,
}

impl Verdict {
    #[must_use]
    pub const fn is_unreviewed(self) -> bool {
        !self.approved && !self.rejected
    }
}

/// A single reviewable change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub id: Iri,
    pub change_type: ChangeType,
    pub subject: ChangeSubject,
    pub predicate: Iri,
    pub object: ObjectValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_object: Option<ObjectValue>,
    #[serde(default, skip_serializing_if = "MultilingualString::is_empty")]
    pub label: MultilingualString,
    pub subject_type: SubjectType,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub approved_by: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub rejected_by: BTreeSet<String>,
}

impl Change {
    /// A created or removed triple on a named subject.
    pub fn named(
        id: Iri,
        change_type: ChangeType,
        subject: Iri,
        predicate: Iri,
        object: ObjectValue,
    ) -> Self {
        debug_assert!(change_type != ChangeType::Modified);
        Self {
            id,
            change_type,
            subject: ChangeSubject::Named(subject),
            predicate,
            object,
            new_object: None,
            label: MultilingualString::new(),
            subject_type: SubjectType::Unknown,
            approved_by: BTreeSet::new(),
            rejected_by: BTreeSet::new(),
        }
    }

    /// An object replacement on a named subject.
    pub fn modified(
        id: Iri,
        subject: Iri,
        predicate: Iri,
        object: ObjectValue,
        new_object: ObjectValue,
    ) -> Self {
        Self {
            change_type: ChangeType::Modified,
            new_object: Some(new_object),
            ..Self::named(id, ChangeType::Created, subject, predicate, object)
        }
    }

    /// A triple inside an anonymous subtree, attached to its parent change.
    pub fn child_of(parent: &Self, id: Iri, predicate: Iri, object: ObjectValue) -> Self {
        Self {
            id,
            change_type: parent.change_type,
            subject: ChangeSubject::Parent(parent.id.clone()),
            predicate,
            object,
            new_object: None,
            label: parent.label.clone(),
            subject_type: SubjectType::BlankNode,
            approved_by: BTreeSet::new(),
            rejected_by: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: MultilingualString) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub const fn with_subject_type(mut self, subject_type: SubjectType) -> Self {
        self.subject_type = subject_type;
        self
    }

    /// Named subject IRI, if the subject is not a parent change.
    #[must_use]
    pub const fn subject_iri(&self) -> Option<&Iri> {
        self.subject.as_named()
    }

    /// Whether this change points at an anonymous subtree from a named subject.
    #[must_use]
    pub const fn points_at_blank_node(&self) -> bool {
        self.subject.as_named().is_some() && self.object.is_blank_node()
    }

    #[must_use]
    pub fn is_in_blank_node(&self) -> bool {
        self.subject_type == SubjectType::BlankNode
    }

    pub fn approve(&mut self, reviewer: impl Into<String>) {
        let reviewer = reviewer.into();
        self.rejected_by.remove(&reviewer);
        self.approved_by.insert(reviewer);
    }

    pub fn reject(&mut self, reviewer: impl Into<String>) {
        let reviewer = reviewer.into();
        self.approved_by.remove(&reviewer);
        self.rejected_by.insert(reviewer);
    }

    /// Verdict of one reviewer, or of anyone when `reviewer` is `None`.
    #[must_use]
    pub fn verdict(&self, reviewer: Option<&str>) -> Verdict {
        match reviewer {
            Some(r) => Verdict {
                approved: self.approved_by.contains(r),
                rejected: self.rejected_by.contains(r),
            },
            None => Verdict {
                approved: !self.approved_by.is_empty(),
                rejected: !self.rejected_by.is_empty(),
            },
        }
    }

    /// Review state of this change on its own.
    #[must_use]
    pub fn review_state(&self, reviewer: Option<&str>) -> ReviewState {
        aggregate_review_state(std::iter::once(self), reviewer)
    }
}

/// Aggregate review state over a group of changes.
///
/// Approved only when every change is approved, Rejected only when every
/// change is rejected. Any unreviewed change, or a mix of verdicts, gives
/// `NotReviewed`. An empty group is `NotReviewed`.
pub fn aggregate_review_state<'a>(
    changes: impl IntoIterator<Item = &'a Change>,
    reviewer: Option<&str>,
) -> ReviewState {
    let mut potentially_approved = true;
    let mut potentially_rejected = true;
    let mut seen_any = false;

    for change in changes {
        seen_any = true;
        let verdict = change.verdict(reviewer);
        if verdict.is_unreviewed() {
            return ReviewState::NotReviewed;
        }
        if verdict.approved {
            potentially_rejected = false;
        }
        if verdict.rejected {
            potentially_approved = false;
        }
        if !potentially_approved && !potentially_rejected {
            return ReviewState::NotReviewed;
        }
    }

    match (seen_any, potentially_approved, potentially_rejected) {
        (true, true, false) => ReviewState::Approved,
        (true, false, true) => ReviewState::Rejected,
        _ => ReviewState::NotReviewed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(n: u32) -> Change {
        Change::named(
            Iri::new(format!("urn:change:{n}")),
            ChangeType::Created,
            Iri::new("http://example.org/a"),
            Iri::new("http://example.org/p"),
            ObjectValue::Literal(Literal::plain("x")),
        )
    }

    #[test]
    fn test_modified_invariant() {
        let c = Change::modified(
            Iri::new("urn:change:1"),
            Iri::new("http://example.org/a"),
            Iri::new("http://example.org/p"),
            ObjectValue::Literal(Literal::plain("old")),
            ObjectValue::Literal(Literal::plain("new")),
        );
        assert_eq!(c.change_type, ChangeType::Modified);
        assert!(c.new_object.is_some());
        assert!(change(2).new_object.is_none());
    }

    #[test]
    fn test_child_inherits_from_parent() {
        let mut label = MultilingualString::new();
        label.insert_if_absent(Some("en"), "Dog");
        let parent = change(1).with_label(label.clone());
        let child = Change::child_of(
            &parent,
            Iri::new("urn:change:2"),
            Iri::new("http://example.org/q"),
            ObjectValue::BlankNode,
        );
        assert_eq!(child.subject, ChangeSubject::Parent(parent.id.clone()));
        assert_eq!(child.subject_type, SubjectType::BlankNode);
        assert_eq!(child.change_type, ChangeType::Created);
        assert_eq!(child.label, label);
    }

    #[test]
    fn test_aggregate_all_approved() {
        let mut a = change(1);
        let mut b = change(2);
        a.approve("alice");
        b.approve("bob");
        assert_eq!(aggregate_review_state([&a, &b], None), ReviewState::Approved);
        assert_eq!(aggregate_review_state([&a, &b], Some("alice")), ReviewState::NotReviewed);
    }

    #[test]
    fn test_aggregate_all_rejected() {
        let mut a = change(1);
        let mut b = change(2);
        a.reject("alice");
        b.reject("alice");
        assert_eq!(aggregate_review_state([&a, &b], Some("alice")), ReviewState::Rejected);
    }

    #[test]
    fn test_aggregate_mixed_and_unreviewed() {
        let mut a = change(1);
        let mut b = change(2);
        a.approve("alice");
        b.reject("alice");
        assert_eq!(aggregate_review_state([&a, &b], None), ReviewState::NotReviewed);

        let c = change(3);
        assert_eq!(aggregate_review_state([&a, &c], None), ReviewState::NotReviewed);
        assert_eq!(aggregate_review_state(std::iter::empty(), None), ReviewState::NotReviewed);
    }

    #[test]
    fn test_approve_then_reject_switches_verdict() {
        let mut a = change(1);
        a.approve("alice");
        a.reject("alice");
        assert!(a.approved_by.is_empty());
        assert_eq!(a.review_state(Some("alice")), ReviewState::Rejected);
    }

    #[test]
    fn test_multilingual_preference() {
        let mut label = MultilingualString::new();
        label.insert_if_absent(Some("cs"), "Pes");
        label.insert_if_absent(None, "Dog");
        label.insert_if_absent(Some("cs"), "Psisko");
        assert_eq!(label.get("cs"), Some("Pes"));
        assert_eq!(label.preferred("de"), Some("Dog"));
    }
}
