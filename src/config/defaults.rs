//! Default configurations and presets for vocab-diff.

use super::types::AppConfig;
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Lenient classification with restriction composition
    Default,
    /// CI: JSON output, fail on changes, quiet
    CiCd,
    /// Strict classification of modifications
    Strict,
    /// Flat change list without composition
    Flat,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CiCd => "ci-cd",
            Self::Strict => "strict",
            Self::Flat => "flat",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            "strict" => Some(Self::Strict),
            "flat" | "atomic" => Some(Self::Flat),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Lenient classification with restriction composition",
            Self::CiCd => "JSON output that fails the build when the draft differs",
            Self::Strict => "Fail when a statement changes the kind of its object",
            Self::Flat => "Atomic changes only, no composite restrictions",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::CiCd, Self::Strict, Self::Flat]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        let mut config = Self::default();
        match preset {
            ConfigPreset::Default => {}
            ConfigPreset::CiCd => {
                config.output.format = ReportFormat::Json;
                config.behavior.fail_on_change = true;
                config.behavior.quiet = true;
            }
            ConfigPreset::Strict => config.diff.strict_modifications = true,
            ConfigPreset::Flat => config.diff.compose_restrictions = false,
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("CI"), Some(ConfigPreset::CiCd));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_ci_preset() {
        let config = AppConfig::from_preset(ConfigPreset::CiCd);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_change);
        assert!(!AppConfig::from_preset(ConfigPreset::Flat).diff.compose_restrictions);
    }
}
