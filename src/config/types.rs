//! Configuration types for normalization and comparison.

use super::defaults::{DEFAULT_MAX_DEPTH, DEFAULT_NUMERIC_EQUIVALENCE};
use crate::normalize::FieldEncoding;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DeltaConfig {
    /// Which normalization rules to register
    pub normalization: NormalizationConfig,
    /// How documents are compared
    pub comparison: ComparisonConfig,
}

impl DeltaConfig {
    /// Create a new `DeltaConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `DeltaConfig` builder.
    pub fn builder() -> DeltaConfigBuilder {
        DeltaConfigBuilder::default()
    }
}

// ============================================================================
// Builder for DeltaConfig
// ============================================================================

/// Builder for constructing `DeltaConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct DeltaConfigBuilder {
    config: DeltaConfig,
}

impl DeltaConfigBuilder {
    /// Enable or disable the built-in rules.
    pub const fn builtin_rules(mut self, enabled: bool) -> Self {
        self.config.normalization.builtin_rules = enabled;
        self
    }

    /// Add a field-folding rule.
    pub fn field_fold(mut self, fold: FieldFoldConfig) -> Self {
        self.config.normalization.field_folds.push(fold);
        self
    }

    /// Set the maximum nesting depth walked by the comparator.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.comparison.max_depth = depth;
        self
    }

    /// Treat numerically equal numbers (`1`, `1.0`) as equal.
    pub const fn numeric_equivalence(mut self, enabled: bool) -> Self {
        self.config.comparison.numeric_equivalence = enabled;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DeltaConfig {
        self.config
    }
}

// ============================================================================
// Normalization Configuration
// ============================================================================

/// Normalization rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Register the built-in rules (Secret `stringData`)
    pub builtin_rules: bool,
    /// Additional field-folding rules, registered after the built-ins
    pub field_folds: Vec<FieldFoldConfig>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            builtin_rules: true,
            field_folds: Vec::new(),
        }
    }
}

/// A field-folding rule declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldFoldConfig {
    /// Rule name, reported in errors
    pub name: String,
    /// Only apply to documents of this `kind`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Only apply to documents declaring this `apiVersion` (or none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Dotted path of the write-only mapping field
    pub write_only_field: String,
    /// Dotted path of the canonical mapping field
    pub canonical_field: String,
    /// Encoding applied to each folded value
    #[serde(default)]
    pub encoding: FieldEncoding,
}

// ============================================================================
// Comparison Configuration
// ============================================================================

/// Comparator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Deepest nesting level walked before the document is rejected as malformed
    pub max_depth: usize,
    /// Compare numbers by value, so `1` equals `1.0`
    pub numeric_equivalence: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            numeric_equivalence: DEFAULT_NUMERIC_EQUIVALENCE,
        }
    }
}
