//! Configuration types for vocab-diff operations.
//!
//! Provides structured configuration for the diff engine, output and exit
//! behavior.

use crate::diff::{ClassificationMode, DiffEngineConfig};
use crate::model::{vocab, DEFAULT_CHANGE_NAMESPACE};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// It can be constructed from CLI arguments, config files, or both (with CLI
/// overriding file settings).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Change detection settings
    pub diff: DiffConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Fail on modifications that change the object kind.
    pub const fn strict_modifications(mut self, strict: bool) -> Self {
        self.config.diff.strict_modifications = strict;
        self
    }

    /// Enable or disable restriction composition.
    pub const fn compose_restrictions(mut self, compose: bool) -> Self {
        self.config.diff.compose_restrictions = compose;
        self
    }

    /// Set the reviewer whose verdicts drive composite review states.
    pub fn reviewer(mut self, reviewer: Option<String>) -> Self {
        self.config.diff.reviewer = reviewer;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section configs
// ============================================================================

/// Change detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Fold OWL restriction subtrees into composite changes
    pub compose_restrictions: bool,
    /// Fail when a removed statement reappears with an object of another kind
    pub strict_modifications: bool,
    /// Label predicates, in order of preference
    pub label_predicates: Vec<String>,
    /// Reviewer whose verdicts drive composite review states (all reviewers if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    /// Namespace for generated change IRIs
    pub change_namespace: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            compose_restrictions: true,
            strict_modifications: false,
            label_predicates: vocab::DEFAULT_LABEL_PREDICATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            reviewer: None,
            change_namespace: DEFAULT_CHANGE_NAMESPACE.to_string(),
        }
    }
}

impl DiffConfig {
    /// Engine settings for this configuration.
    #[must_use]
    pub fn to_engine_config(&self) -> DiffEngineConfig {
        DiffEngineConfig {
            compose_restrictions: self.compose_restrictions,
            mode: if self.strict_modifications {
                ClassificationMode::Strict
            } else {
                ClassificationMode::Lenient
            },
            label_predicates: self.label_predicates.clone(),
            reviewer: self.reviewer.clone(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Per-run inputs
// ============================================================================

/// Input files of one diff run.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Last published graph
    pub canonical: PathBuf,
    /// Work-in-progress graph
    pub draft: PathBuf,
    /// Previously persisted change list (JSON) to reconcile with
    pub previous: Option<PathBuf>,
}
