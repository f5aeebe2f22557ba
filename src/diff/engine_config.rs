//! Configuration types for the diff engine.

use super::statements::ClassificationMode;
use crate::model::vocab;

/// Settings for one [`DiffEngine`](super::DiffEngine).
#[derive(Debug, Clone)]
pub struct DiffEngineConfig {
    /// Fold restriction subtrees into composite changes
    pub compose_restrictions: bool,
    /// Classification mode for Modified detection
    pub mode: ClassificationMode,
    /// Label predicates in order of preference
    pub label_predicates: Vec<String>,
    /// Reviewer whose verdicts drive composite review states
    pub reviewer: Option<String>,
}

impl Default for DiffEngineConfig {
    fn default() -> Self {
        Self {
            compose_restrictions: true,
            mode: ClassificationMode::Lenient,
            label_predicates: vocab::DEFAULT_LABEL_PREDICATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            reviewer: None,
        }
    }
}

impl DiffEngineConfig {
    /// Strict classification: fail on incompatible modifications.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            mode: ClassificationMode::Strict,
            ..Self::default()
        }
    }

    /// Flat changes only, no composition.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            compose_restrictions: false,
            ..Self::default()
        }
    }
}
