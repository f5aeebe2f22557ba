//! Plain-statement change computer implementation.

use crate::diff::statements::{ClassifiedStatement, StatementDiffer};
use crate::diff::traits::{ChangeComputer, ChangeContext};
use crate::error::Result;
use crate::model::{Change, ChangeType, Graph, ObjectValue, Triple};

/// Emits one change per created, modified or removed plain triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementChangeComputer {
    differ: StatementDiffer,
}

impl StatementChangeComputer {
    /// Create a new statement change computer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            differ: StatementDiffer::new(),
        }
    }

    fn to_change(statement: ClassifiedStatement, ctx: &mut ChangeContext<'_>) -> Option<Change> {
        let (change_type, triple, new_object) = match statement {
            ClassifiedStatement::Created(t) => (ChangeType::Created, t, None),
            ClassifiedStatement::Removed(t) => (ChangeType::Removed, t, None),
            ClassifiedStatement::Modified { old, new_object } => {
                (ChangeType::Modified, old, Some(new_object))
            }
        };
        let Triple {
            subject,
            predicate,
            object,
        } = triple;
        let subject = subject.as_named()?.clone();

        let id = ctx.next_id();
        let object = ObjectValue::from(&object);
        let change = match new_object {
            Some(new_object) => {
                Change::modified(id, subject.clone(), predicate, object, ObjectValue::from(&new_object))
            }
            None => Change::named(id, change_type, subject.clone(), predicate, object),
        };
        Some(
            change
                .with_label(ctx.labels.label(&subject))
                .with_subject_type(ctx.labels.subject_type(&subject)),
        )
    }
}

impl ChangeComputer for StatementChangeComputer {
    fn compute(
        &self,
        canonical: &Graph,
        draft: &Graph,
        ctx: &mut ChangeContext<'_>,
    ) -> Result<Vec<Change>> {
        let statements = self.differ.diff(canonical, draft).classify(ctx.mode)?;
        Ok(statements
            .into_iter()
            .filter_map(|s| Self::to_change(s, ctx))
            .collect())
    }

    fn name(&self) -> &str {
        "StatementChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::labels::LabelResolver;
    use crate::diff::statements::ClassificationMode;
    use crate::model::{vocab, Iri, Literal, SequentialIdentifierGenerator, SubjectType};

    fn run(canonical: &Graph, draft: &Graph) -> Vec<Change> {
        let ids = SequentialIdentifierGenerator::new("urn:change:");
        let mut ctx = ChangeContext::new(
            &ids,
            LabelResolver::with_defaults(canonical, draft),
            ClassificationMode::Lenient,
        );
        StatementChangeComputer::new()
            .compute(canonical, draft, &mut ctx)
            .expect("lenient statement diff")
    }

    #[test]
    fn test_statement_change_computer_name() {
        assert_eq!(StatementChangeComputer::new().name(), "StatementChangeComputer");
    }

    #[test]
    fn test_removed_concept_is_term() {
        let a = Iri::new("http://example.org/A");
        let canonical: Graph = vec![Triple::new(a.clone(), vocab::RDF_TYPE, Iri::new(vocab::SKOS_CONCEPT))]
            .into_iter()
            .collect();
        let changes = run(&canonical, &Graph::new());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Removed);
        assert_eq!(changes[0].subject_type, SubjectType::Term);
        assert_eq!(changes[0].subject_iri(), Some(&a));
    }

    #[test]
    fn test_modified_carries_label_and_new_object() {
        let a = Iri::new("http://example.org/A");
        let canonical: Graph = vec![Triple::new(a.clone(), vocab::SKOS_PREF_LABEL, Literal::lang("old", "en"))]
            .into_iter()
            .collect();
        let draft: Graph = vec![Triple::new(a, vocab::SKOS_PREF_LABEL, Literal::lang("new", "en"))]
            .into_iter()
            .collect();
        let changes = run(&canonical, &draft);
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.change_type, ChangeType::Modified);
        assert_eq!(change.object, ObjectValue::Literal(Literal::lang("old", "en")));
        assert_eq!(change.new_object, Some(ObjectValue::Literal(Literal::lang("new", "en"))));
        assert_eq!(change.label.get("en"), Some("new"));
    }
}
