//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{Cardinality, ComposedChange, DiffResult, RestrictionChange, RestrictionSide};
use crate::model::{Change, ChangeSubject, ChangeType, Iri, ObjectValue, ReviewState};

/// Language preferred for labels in text output.
const DISPLAY_LANGUAGE: &str = "cs";

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let summary = &result.summary;

        // Header
        let title = config.title.as_deref().unwrap_or("Vocabulary Diff Summary");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        // File info
        if let (Some(canonical), Some(draft)) = (
            config.metadata.canonical_path.as_deref(),
            config.metadata.draft_path.as_deref(),
        ) {
            lines.push(format!(
                "{}  {} → {}",
                self.color("Files:", "cyan"),
                canonical,
                draft
            ));
            lines.push(String::new());
        }

        // Changes
        lines.push(self.color("Changes:", "bold"));
        if summary.created > 0 {
            lines.push(format!(
                "  {} {} created",
                self.color(&format!("+{}", summary.created), "green"),
                plural(summary.created, "statement", "statements")
            ));
        }
        if summary.removed > 0 {
            lines.push(format!(
                "  {} {} removed",
                self.color(&format!("-{}", summary.removed), "red"),
                plural(summary.removed, "statement", "statements")
            ));
        }
        if summary.modified > 0 {
            lines.push(format!(
                "  {} {} modified",
                self.color(&format!("~{}", summary.modified), "yellow"),
                plural(summary.modified, "statement", "statements")
            ));
        }
        if !result.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        if summary.blank_node_changes > 0 {
            lines.push(format!(
                "  {} inside anonymous nodes",
                self.color(&summary.blank_node_changes.to_string(), "dim")
            ));
        }

        // Composites
        if summary.restrictions > 0 {
            lines.push(String::new());
            lines.push(self.color("Restrictions:", "bold"));
            for restriction in result.composed.iter().filter_map(ComposedChange::as_restriction) {
                lines.push(format!(
                    "  {} {}",
                    self.change_marker(restriction.change_type),
                    restriction_title(restriction)
                ));
            }
        }

        // Review
        if result.has_changes() {
            let reviewer = config.reviewer.as_deref();
            let (mut approved, mut rejected, mut pending) = (0usize, 0usize, 0usize);
            for entry in &result.composed {
                match entry.review_state(reviewer) {
                    ReviewState::Approved => approved += 1,
                    ReviewState::Rejected => rejected += 1,
                    ReviewState::NotReviewed => pending += 1,
                }
            }
            lines.push(String::new());
            lines.push(format!(
                "{}  {} approved, {} rejected, {} not reviewed",
                self.color("Review:", "cyan"),
                self.color(&approved.to_string(), "green"),
                self.color(&rejected.to_string(), "red"),
                pending
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

impl SummaryReporter {
    fn change_marker(&self, change_type: ChangeType) -> String {
        marker(change_type, self.colored)
    }
}

fn marker(change_type: ChangeType, colored: bool) -> String {
    ansi_color(strip_marker(change_type), marker_color(change_type), colored)
}

const fn marker_color(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::Created => "green",
        ChangeType::Removed => "red",
        ChangeType::Modified => "yellow",
        ChangeType::Rollbacked => "dim",
    }
}

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn row(&self, change_type: ChangeType, subject: &str, predicate: &str, value: &str) -> String {
        // Pad before coloring so escape codes do not skew the columns.
        let status = format!("{:<12}", strip_marker(change_type));
        let status = self.color(&status, marker_color(change_type));
        format!(
            "{} {:<32} {:<24} {}",
            status,
            truncate(subject, 32),
            truncate(predicate, 24),
            truncate(value, 60)
        )
    }

    fn atomic_row(&self, change: &Change) -> String {
        let subject = match &change.subject {
            ChangeSubject::Named(iri) => change
                .label
                .preferred(DISPLAY_LANGUAGE)
                .map_or_else(|| local_name(iri).to_string(), ToString::to_string),
            ChangeSubject::Parent(_) => "  └ []".to_string(),
        };
        let value = match &change.new_object {
            Some(new_object) => format!(
                "{} → {}",
                object_text(&change.object),
                object_text(new_object)
            ),
            None => object_text(&change.object),
        };
        self.row(change.change_type, &subject, local_name(&change.predicate), &value)
    }

    fn restriction_row(&self, restriction: &RestrictionChange) -> String {
        let value = format!(
            "{} / {}",
            side_text(&restriction.start),
            side_text(&restriction.end)
        );
        self.row(
            restriction.change_type,
            &restriction_title(restriction),
            "restriction",
            &value,
        )
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color(
            &format!(
                "{:<12} {:<32} {:<24} {}",
                "STATUS", "SUBJECT", "PREDICATE", "VALUE"
            ),
            "bold",
        ));
        lines.push("─".repeat(100));

        let limit = config.max_items.unwrap_or(usize::MAX);
        for entry in result.composed.iter().take(limit) {
            lines.push(match entry {
                ComposedChange::Atomic(change) => self.atomic_row(change),
                ComposedChange::Restriction(restriction) => self.restriction_row(restriction),
            });
        }
        if result.composed.len() > limit {
            lines.push(self.color(
                &format!("... and {} more entries", result.composed.len() - limit),
                "dim",
            ));
        }

        // Summary footer
        let summary = &result.summary;
        lines.push(String::new());
        lines.push(format!(
            "Total: {} created, {} modified, {} removed | {} in anonymous nodes | {} restrictions",
            summary.created,
            summary.modified,
            summary.removed,
            summary.blank_node_changes,
            summary.restrictions
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

const fn strip_marker(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::Created => "+ Created",
        ChangeType::Removed => "- Removed",
        ChangeType::Modified => "~ Modified",
        ChangeType::Rollbacked => "↺ Rollback",
    }
}

fn restriction_title(restriction: &RestrictionChange) -> String {
    restriction
        .label
        .preferred(DISPLAY_LANGUAGE)
        .map_or_else(|| local_name(&restriction.relation).to_string(), ToString::to_string)
}

fn side_text(side: &RestrictionSide) -> String {
    let class = match (&side.class.old, &side.class.new) {
        (None, None) => "-".to_string(),
        (old, new) => {
            let name = |class: &Option<crate::diff::ClassRef>| {
                class.as_ref().map_or_else(
                    || "∅".to_string(),
                    |c| {
                        c.label
                            .preferred(DISPLAY_LANGUAGE)
                            .map_or_else(|| local_name(&c.iri).to_string(), ToString::to_string)
                    },
                )
            };
            if side.class.is_changed() {
                format!("{} → {}", name(old), name(new))
            } else {
                name(new)
            }
        }
    };
    format!("{class} {}", cardinality_text(&side.cardinality))
}

fn cardinality_text(cardinality: &Cardinality) -> String {
    let bound = |value: Option<u64>, open: &str| value.map_or_else(|| open.to_string(), |v| v.to_string());
    let old = format!(
        "{}..{}",
        bound(cardinality.min.old, "0"),
        bound(cardinality.max.old, "*")
    );
    let new = format!(
        "{}..{}",
        bound(cardinality.min.new, "0"),
        bound(cardinality.max.new, "*")
    );
    if cardinality.min.is_changed() || cardinality.max.is_changed() {
        format!("[{old} → {new}]")
    } else {
        format!("[{new}]")
    }
}

fn object_text(object: &ObjectValue) -> String {
    match object {
        ObjectValue::Iri(iri) => local_name(iri).to_string(),
        ObjectValue::Literal(literal) => literal.to_string(),
        ObjectValue::BlankNode => "[]".to_string(),
    }
}

/// Fragment or last path segment of an IRI.
fn local_name(iri: &Iri) -> &str {
    let value = iri.as_str();
    value
        .rsplit(|c: char| c == '#' || c == '/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(value)
}

/// Truncate a string to fit within `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ValueChange;
    use crate::model::{Literal, MultilingualString};

    fn change(change_type: ChangeType, object: ObjectValue) -> Change {
        Change::named(
            Iri::new("urn:change:1"),
            change_type,
            Iri::new("https://slovník.gov.cz/pojem/osoba"),
            Iri::new("http://www.w3.org/2004/02/skos/core#prefLabel"),
            object,
        )
    }

    fn result_with(composed: Vec<ComposedChange>) -> DiffResult {
        let changes = composed
            .iter()
            .flat_map(|entry| entry.constituents().to_vec())
            .collect();
        DiffResult::from_changes(changes, composed)
    }

    #[test]
    fn test_summary_no_changes() {
        let report = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&DiffResult::new(), &ReportConfig::default())
            .unwrap();
        assert!(report.contains("No changes"));
        assert!(!report.contains("Review:"));
    }

    #[test]
    fn test_summary_counts_and_review() {
        let mut approved = change(ChangeType::Created, ObjectValue::Literal(Literal::plain("a")));
        approved.approve("alice");
        let result = result_with(vec![
            ComposedChange::Atomic(approved),
            ComposedChange::Atomic(change(ChangeType::Removed, ObjectValue::Literal(Literal::plain("b")))),
        ]);
        let report = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&result, &ReportConfig::default())
            .unwrap();
        assert!(report.contains("+1 statement created"));
        assert!(report.contains("-1 statement removed"));
        assert!(report.contains("1 approved, 0 rejected, 1 not reviewed"));
    }

    #[test]
    fn test_table_rows() {
        let modified = Change::modified(
            Iri::new("urn:change:2"),
            Iri::new("https://slovník.gov.cz/pojem/osoba"),
            Iri::new("http://www.w3.org/2004/02/skos/core#prefLabel"),
            ObjectValue::Literal(Literal::lang("Osoba", "cs")),
            ObjectValue::Literal(Literal::lang("Člověk", "cs")),
        );
        let result = result_with(vec![ComposedChange::Atomic(modified)]);
        let report = TableReporter::new()
            .no_color()
            .generate_diff_report(&result, &ReportConfig::default())
            .unwrap();
        assert!(report.contains("~ Modified"));
        assert!(report.contains("osoba"));
        assert!(report.contains("prefLabel"));
        assert!(report.contains("\"Osoba\"@cs → \"Člověk\"@cs"));
        assert!(report.contains("Total: 0 created, 1 modified, 0 removed"));
    }

    #[test]
    fn test_table_respects_max_items() {
        let entries = (0..3)
            .map(|_| ComposedChange::Atomic(change(ChangeType::Created, ObjectValue::BlankNode)))
            .collect();
        let config = ReportConfig {
            max_items: Some(1),
            ..ReportConfig::default()
        };
        let report = TableReporter::new()
            .no_color()
            .generate_diff_report(&result_with(entries), &config)
            .unwrap();
        assert!(report.contains("... and 2 more entries"));
    }

    #[test]
    fn test_cardinality_text() {
        let unchanged = Cardinality {
            min: ValueChange { old: Some(1), new: Some(1) },
            max: ValueChange { old: None, new: None },
        };
        assert_eq!(cardinality_text(&unchanged), "[1..*]");
        let changed = Cardinality {
            min: ValueChange { old: Some(1), new: Some(2) },
            max: ValueChange::default(),
        };
        assert_eq!(cardinality_text(&changed), "[1..* → 2..*]");
    }

    #[test]
    fn test_restriction_title_prefers_label() {
        let mut label = MultilingualString::new();
        label.insert_if_absent(Some("cs"), "má člena");
        let restriction = RestrictionChange {
            relation: Iri::new("https://slovník.gov.cz/pojem/má-člena"),
            label,
            start: RestrictionSide::default(),
            end: RestrictionSide::default(),
            change_type: ChangeType::Created,
            review_state: ReviewState::NotReviewed,
            affected_changes: Vec::new(),
        };
        assert_eq!(restriction_title(&restriction), "má člena");
    }

    #[test]
    fn test_local_name_and_truncate() {
        assert_eq!(local_name(&Iri::new("http://example.org/a#b")), "b");
        assert_eq!(local_name(&Iri::new("http://example.org/a/")), "a");
        assert_eq!(truncate("slovník", 5), "sl...");
    }
}
