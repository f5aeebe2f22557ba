//! Diff result structures.

use super::composer::ComposedChange;
use crate::model::{Change, ChangeType};
use serde::Serialize;

/// Complete result of a vocabulary diff.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct DiffResult {
    /// Summary statistics
    pub summary: DiffSummary,
    /// Flat, ordered change list
    pub changes: Vec<Change>,
    /// Change list with restriction subtrees folded into composites
    pub composed: Vec<ComposedChange>,
}

impl DiffResult {
    /// Create a new empty diff result
    pub fn new() -> Self {
        Self {
            summary: DiffSummary::default(),
            changes: Vec::new(),
            composed: Vec::new(),
        }
    }

    /// Result for the given flat and composed lists, with its summary.
    pub fn from_changes(changes: Vec<Change>, composed: Vec<ComposedChange>) -> Self {
        let mut result = Self {
            summary: DiffSummary::default(),
            changes,
            composed,
        };
        result.calculate_summary();
        result
    }

    /// Calculate and update summary statistics
    pub fn calculate_summary(&mut self) {
        let mut summary = DiffSummary {
            total_changes: self.changes.len(),
            ..DiffSummary::default()
        };
        for change in &self.changes {
            if change.is_in_blank_node() {
                summary.blank_node_changes += 1;
            }
            match change.change_type {
                ChangeType::Created => summary.created += 1,
                ChangeType::Modified => summary.modified += 1,
                ChangeType::Removed => summary.removed += 1,
                ChangeType::Rollbacked => summary.rollbacked += 1,
            }
        }
        summary.restrictions = self
            .composed
            .iter()
            .filter(|c| c.as_restriction().is_some())
            .count();
        self.summary = summary;
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Find a change by its identity
    #[must_use]
    pub fn find_change(&self, id: &str) -> Option<&Change> {
        self.changes.iter().find(|c| c.id == id)
    }
}

impl Default for DiffResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary counts of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub total_changes: usize,
    pub created: usize,
    pub modified: usize,
    pub removed: usize,
    pub rollbacked: usize,
    /// Changes whose subject is a parent change
    pub blank_node_changes: usize,
    /// Composite restriction changes in the composed list
    pub restrictions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Iri, Literal, ObjectValue};

    fn change(n: u32, change_type: ChangeType) -> Change {
        Change::named(
            Iri::new(format!("urn:change:{n}")),
            change_type,
            Iri::new("http://example.org/a"),
            Iri::new("http://example.org/p"),
            ObjectValue::Literal(Literal::plain("x")),
        )
    }

    #[test]
    fn test_summary_counts() {
        let changes = vec![
            change(0, ChangeType::Created),
            change(1, ChangeType::Created),
            change(2, ChangeType::Removed),
        ];
        let composed = changes.iter().cloned().map(ComposedChange::Atomic).collect();
        let result = DiffResult::from_changes(changes, composed);
        assert_eq!(result.summary.total_changes, 3);
        assert_eq!(result.summary.created, 2);
        assert_eq!(result.summary.removed, 1);
        assert_eq!(result.summary.restrictions, 0);
        assert!(result.has_changes());
        assert!(result.find_change("urn:change:2").is_some());
    }

    #[test]
    fn test_empty_result() {
        let result = DiffResult::new();
        assert!(!result.has_changes());
        assert_eq!(result.summary, DiffSummary::default());
    }
}
