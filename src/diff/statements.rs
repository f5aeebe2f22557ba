//! Set difference over plain triples and Modified classification.
//!
//! Only triples with neither an anonymous subject nor an anonymous object
//! take part. Anonymous subtrees are handled by the blank-node phase.

use crate::error::{Result, VocabDiffError};
use crate::model::{Graph, Iri, Triple, Value};
use indexmap::IndexMap;

/// How to treat a removed triple whose subject and predicate reappear in the
/// draft with an object of a different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassificationMode {
    /// Report it as Removed plus Created.
    #[default]
    Lenient,
    /// Fail with a classification error naming the triple.
    Strict,
}

/// Triples grouped by their named subject.
pub type TriplesBySubject = IndexMap<Iri, Vec<Triple>>;

/// A plain triple classified as created, removed or modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedStatement {
    Created(Triple),
    Removed(Triple),
    Modified { old: Triple, new_object: Value },
}

impl ClassifiedStatement {
    /// The triple the change is recorded against (the old one for Modified).
    #[must_use]
    pub const fn triple(&self) -> &Triple {
        match self {
            Self::Created(t) | Self::Removed(t) => t,
            Self::Modified { old, .. } => old,
        }
    }
}

/// Result of [`StatementDiffer::diff`].
#[derive(Debug, Clone, Default)]
pub struct StatementDiff {
    /// Triples in the modified graph but not in the base graph
    pub added: TriplesBySubject,
    /// Triples in the base graph but not in the modified graph
    pub removed: TriplesBySubject,
}

impl StatementDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Classify the difference.
    ///
    /// For subjects present in both maps, each removed triple takes the first
    /// added triple with the same predicate and a compatible object; the pair
    /// becomes Modified and the added triple is not matched again. The
    /// output lists Created, then Modified, then Removed statements.
    pub fn classify(self, mode: ClassificationMode) -> Result<Vec<ClassifiedStatement>> {
        let Self { mut added, removed } = self;
        let mut modified = Vec::new();
        let mut removed_out = Vec::new();

        for (subject, triples) in removed {
            let Some(candidates) = added.get_mut(&subject) else {
                removed_out.extend(triples.into_iter().map(ClassifiedStatement::Removed));
                continue;
            };

            for old in triples {
                let position = candidates.iter().position(|new| {
                    new.predicate == old.predicate && old.object.compatible_with(&new.object)
                });
                match position {
                    Some(idx) => {
                        let new = candidates.remove(idx);
                        modified.push(ClassifiedStatement::Modified {
                            old,
                            new_object: new.object,
                        });
                    }
                    None => {
                        let expected_modification =
                            candidates.iter().any(|new| new.predicate == old.predicate);
                        if expected_modification && mode == ClassificationMode::Strict {
                            return Err(VocabDiffError::incompatible_modification(&old));
                        }
                        removed_out.push(ClassifiedStatement::Removed(old));
                    }
                }
            }
        }

        let mut out: Vec<ClassifiedStatement> = added
            .into_values()
            .flatten()
            .map(ClassifiedStatement::Created)
            .collect();
        out.extend(modified);
        out.extend(removed_out);
        Ok(out)
    }
}

/// Computes plain-triple differences between two graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementDiffer;

impl StatementDiffer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// `added` = plain triples of `modified` not in `base`; `removed` the reverse.
    #[must_use]
    pub fn diff(&self, base: &Graph, modified: &Graph) -> StatementDiff {
        StatementDiff {
            added: one_sided(modified, base),
            removed: one_sided(base, modified),
        }
    }
}

fn one_sided(from: &Graph, other: &Graph) -> TriplesBySubject {
    let mut out = TriplesBySubject::new();
    for triple in from.plain_triples() {
        if other.contains(triple) {
            continue;
        }
        if let Some(subject) = triple.subject.as_named() {
            out.entry(subject.clone()).or_default().push(triple.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{vocab, AnonId, Literal};

    fn a() -> Iri {
        Iri::new("http://example.org/A")
    }

    fn label(text: &str, lang: &str) -> Triple {
        Triple::new(a(), vocab::SKOS_PREF_LABEL, Literal::lang(text, lang))
    }

    fn graph(triples: Vec<Triple>) -> Graph {
        triples.into_iter().collect()
    }

    #[test]
    fn test_identical_graphs() {
        let g = graph(vec![label("Dog", "en")]);
        let diff = StatementDiffer::new().diff(&g, &g);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_anonymous_triples_ignored() {
        let base = Graph::new();
        let modified = graph(vec![Triple::new(
            a(),
            "http://example.org/p",
            Value::Anonymous(AnonId::new(0)),
        )]);
        assert!(StatementDiffer::new().diff(&base, &modified).is_empty());
    }

    #[test]
    fn test_modified_literal() {
        let base = graph(vec![label("old", "en")]);
        let modified = graph(vec![label("new", "en")]);
        let out = StatementDiffer::new()
            .diff(&base, &modified)
            .classify(ClassificationMode::Strict)
            .expect("compatible modification");
        assert_eq!(
            out,
            vec![ClassifiedStatement::Modified {
                old: label("old", "en"),
                new_object: Value::Literal(Literal::lang("new", "en")),
            }]
        );
    }

    #[test]
    fn test_language_change_is_not_modification() {
        let base = graph(vec![label("Dog", "en")]);
        let modified = graph(vec![label("Pes", "cs")]);
        let out = StatementDiffer::new()
            .diff(&base, &modified)
            .classify(ClassificationMode::Lenient)
            .expect("lenient never fails");
        assert_eq!(
            out,
            vec![
                ClassifiedStatement::Created(label("Pes", "cs")),
                ClassifiedStatement::Removed(label("Dog", "en")),
            ]
        );
    }

    #[test]
    fn test_strict_mode_rejects_kind_change() {
        let base = graph(vec![label("Dog", "en")]);
        let modified = graph(vec![Triple::new(
            a(),
            vocab::SKOS_PREF_LABEL,
            Iri::new("http://example.org/Dog"),
        )]);
        let err = StatementDiffer::new()
            .diff(&base, &modified)
            .classify(ClassificationMode::Strict)
            .expect_err("kind change must fail in strict mode");
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_first_compatible_match_wins() {
        let p = "http://example.org/broader";
        let base = graph(vec![Triple::new(a(), p, Iri::new("http://example.org/X"))]);
        let modified = graph(vec![
            Triple::new(a(), p, Iri::new("http://example.org/Y")),
            Triple::new(a(), p, Iri::new("http://example.org/Z")),
        ]);
        let out = StatementDiffer::new()
            .diff(&base, &modified)
            .classify(ClassificationMode::Strict)
            .expect("compatible");
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            ClassifiedStatement::Created(Triple::new(a(), p, Iri::new("http://example.org/Z")))
        );
        assert!(matches!(
            &out[1],
            ClassifiedStatement::Modified { new_object: Value::Named(iri), .. }
                if iri == "http://example.org/Y"
        ));
    }
}
