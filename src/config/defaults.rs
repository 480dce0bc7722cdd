//! Default values and named presets.

use super::types::{ComparisonConfig, DeltaConfig, NormalizationConfig};

/// Default nesting depth the comparator walks before giving up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Numbers compare by value unless a preset says otherwise.
pub const DEFAULT_NUMERIC_EQUIVALENCE: bool = true;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Built-in rules, numeric equivalence
    Default,
    /// Built-in rules, numbers must match exactly (`1` differs from `1.0`)
    Strict,
    /// No normalization at all: a plain structural diff
    Raw,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Raw => "raw",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "raw" | "structural" => Some(Self::Raw),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Built-in normalization with numeric equivalence",
            Self::Strict => "Built-in normalization, numbers compared by representation",
            Self::Raw => "No normalization rules; structural comparison only",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Raw]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl DeltaConfig {
    /// Create a configuration from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self {
                normalization: NormalizationConfig::default(),
                comparison: ComparisonConfig {
                    numeric_equivalence: false,
                    ..ComparisonConfig::default()
                },
            },
            ConfigPreset::Raw => Self {
                normalization: NormalizationConfig {
                    builtin_rules: false,
                    field_folds: Vec::new(),
                },
                comparison: ComparisonConfig::default(),
            },
        }
    }
}
