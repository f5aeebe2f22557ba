//! Configuration module for vocab-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vocab_diff::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::CiCd);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .strict_modifications(true)
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use vocab_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.vocab-diff.yaml` file in your project root or `~/.config/vocab-diff/`:
//!
//! ```yaml
//! diff:
//!   strict_modifications: true
//!   reviewer: alice
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.vocab-diff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema");
        assert!(schema.contains("\"diff\""));
        assert!(schema.contains("strict_modifications"));
    }
}
