//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".vocab-diff.yaml",
    ".vocab-diff.yml",
    "vocab-diff.yaml",
    "vocab-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/vocab-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("vocab-diff")))
    {
        return Some(path);
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override; this is how CLI
    /// args are layered over file config.
    pub fn merge(&mut self, other: &Self) {
        // Diff config
        let defaults = Self::default();
        if !other.diff.compose_restrictions {
            self.diff.compose_restrictions = false;
        }
        if other.diff.strict_modifications {
            self.diff.strict_modifications = true;
        }
        if other.diff.label_predicates != defaults.diff.label_predicates {
            self.diff.label_predicates.clone_from(&other.diff.label_predicates);
        }
        if other.diff.reviewer.is_some() {
            self.diff.reviewer.clone_from(&other.diff.reviewer);
        }
        if other.diff.change_namespace != defaults.diff.change_namespace {
            self.diff.change_namespace.clone_from(&other.diff.change_namespace);
        }

        // Output config - only override if explicitly set
        if other.output.format != crate::reports::ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Vocabulary Diff Configuration
# Place this file at .vocab-diff.yaml in your project root or ~/.config/vocab-diff/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Vocabulary Diff Configuration File
# ====================================
#
# This file configures vocab-diff behavior. Place it at:
#   - .vocab-diff.yaml in your project root
#   - ~/.config/vocab-diff/vocab-diff.yaml for global config
#
# CLI arguments always override file settings.

# Change detection
diff:
  # Fold OWL restriction subtrees into composite changes
  compose_restrictions: true
  # Fail when a removed statement reappears with an object of another kind
  strict_modifications: false
  # Label predicates, in order of preference (the default is prefLabel,
  # then dc:title; dcterms:title is added here)
  label_predicates:
    - http://www.w3.org/2004/02/skos/core#prefLabel
    - http://purl.org/dc/terms/title
    - http://purl.org/dc/elements/1.1/title
  # Reviewer whose verdicts drive composite review states
  # reviewer: alice
  # Namespace for generated change IRIs
  change_namespace: https://example.org/vocab-diff/change/

# Output configuration
output:
  # Format: auto, json, summary, table
  format: auto
  # Output file path (omit for stdout)
  # file: changes.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".vocab-diff.yaml");
        std::fs::write(&config_path, "diff:\n  strict_modifications: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
diff:
  strict_modifications: true
  reviewer: alice
behavior:
  fail_on_change: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.diff.strict_modifications);
        assert!(config.diff.compose_restrictions);
        assert_eq!(config.diff.reviewer.as_deref(), Some("alice"));
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        base.diff.reviewer = Some("alice".to_string());

        let override_config = AppConfig::builder()
            .strict_modifications(true)
            .compose_restrictions(false)
            .quiet(true)
            .build();
        base.merge(&override_config);

        assert!(base.diff.strict_modifications);
        assert!(!base.diff.compose_restrictions);
        assert_eq!(base.diff.reviewer.as_deref(), Some("alice"));
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_generated_examples_parse() {
        let example = generate_example_config();
        assert!(example.contains("diff:"));
        let full: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("example parses");
        assert_eq!(full.diff.label_predicates.len(), 3);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "behavior:\n  quiet: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
