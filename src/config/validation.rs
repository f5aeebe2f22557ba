//! Configuration validation for vocab-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.label_predicates.is_empty() {
            errors.push(ConfigError {
                field: "diff.label_predicates".to_string(),
                message: "At least one label predicate is required".to_string(),
            });
        }
        for predicate in &self.label_predicates {
            if !looks_like_iri(predicate) {
                errors.push(ConfigError {
                    field: "diff.label_predicates".to_string(),
                    message: format!("'{predicate}' is not an absolute IRI"),
                });
            }
        }

        if !looks_like_iri(&self.change_namespace) {
            errors.push(ConfigError {
                field: "diff.change_namespace".to_string(),
                message: format!("'{}' is not an absolute IRI", self.change_namespace),
            });
        }

        if let Some(reviewer) = &self.reviewer {
            if reviewer.trim().is_empty() {
                errors.push(ConfigError {
                    field: "diff.reviewer".to_string(),
                    message: "Reviewer id must not be blank".to_string(),
                });
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // BehaviorConfig contains only boolean flags that don't need validation
        Vec::new()
    }
}

/// A scheme followed by `:` and a non-empty remainder.
fn looks_like_iri(value: &str) -> bool {
    match value.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_label_predicate() {
        let config = DiffConfig {
            label_predicates: vec!["prefLabel".to_string()],
            ..DiffConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "diff.label_predicates");
    }

    #[test]
    fn test_blank_reviewer_and_namespace() {
        let config = DiffConfig {
            reviewer: Some("  ".to_string()),
            change_namespace: "not an iri".to_string(),
            ..DiffConfig::default()
        };
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_output_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());
        assert!(config.validate()[0].to_string().starts_with("output.file"));
    }

    #[test]
    fn test_looks_like_iri() {
        assert!(looks_like_iri("urn:change:"));
        assert!(looks_like_iri("https://slovník.gov.cz/x"));
        assert!(!looks_like_iri("1http://x"));
        assert!(!looks_like_iri("plain"));
    }
}
